use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use school_scheduler::reporter::{
    class_schedule_text, generate_json_report, teacher_schedule_text, write_reports,
    OutputFormat, ReportContext,
};
use school_scheduler::repository::{JsonFileRepository, Repository};
use school_scheduler::scheduler::{generate_slots, generate_with_progress};
use school_scheduler::types::{
    Allocation, AllocationId, ClassGroup, ClassId, Difficulty, Room, RoomId, RoomType,
    SchoolConfig, Subject, SubjectId, SubjectKind, Teacher, TeacherId, TimeSlotId,
    TimetableEntryId,
};
use school_scheduler::validator::validate_move;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "school-scheduler")]
#[command(about = "Constraint-based school timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a timetable from a data directory
    Generate {
        /// Directory holding the repository's JSON files and config.toml
        #[arg(short, long)]
        data: PathBuf,

        /// Solver time budget, in seconds
        #[arg(short, long, default_value_t = school_scheduler::scheduler::search_driver::DEFAULT_TIME_LIMIT_SECONDS)]
        time_limit: u64,

        /// Suppress progress output, print a JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate and print the weekly time-slot grid for a data directory
    Slots {
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Validate a proposed manual move of one timetable entry
    ValidateMove {
        #[arg(short, long)]
        data: PathBuf,

        /// Timetable entry id to move
        #[arg(long)]
        entry: i64,

        /// Destination time slot id
        #[arg(long)]
        slot: i64,

        /// Destination room id (defaults to the entry's current room)
        #[arg(long)]
        room: Option<i64>,
    },

    /// Print a summary or per-teacher/per-class view of the persisted timetable
    Report {
        #[arg(short, long)]
        data: PathBuf,

        /// Output format: json, markdown, or text
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the report to `--data/<output>` instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print one teacher's schedule
        #[arg(long)]
        teacher: Option<i64>,

        /// Print one class's schedule
        #[arg(long)]
        class: Option<i64>,
    },

    /// Generate a small self-consistent demo dataset and run `generate` on it
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { data, time_limit, quiet } => run_generate(&data, time_limit, quiet),
        Commands::Slots { data } => run_slots(&data),
        Commands::ValidateMove { data, entry, slot, room } => {
            run_validate_move(&data, entry, slot, room)
        }
        Commands::Report { data, format, output, teacher, class } => {
            run_report(&data, &format, output, teacher, class)
        }
        Commands::Demo => run_demo(),
    }
}

fn run_generate(data: &PathBuf, time_limit: u64, quiet: bool) -> Result<()> {
    let mut repo = JsonFileRepository::open(data);
    let outcome = generate_with_progress(&mut repo, time_limit, quiet)
        .context("failed to generate a timetable")?;

    if quiet {
        let summary = serde_json::json!({
            "status": format!("{:?}", outcome.status),
            "entries_written": outcome.entries_written,
            "solve_time_ms": outcome.solve_time_ms,
        });
        println!("{}", summary);
    } else {
        school_scheduler::reporter::print_summary(
            outcome.status,
            outcome.entries_written,
            outcome.solve_time_ms,
        );
    }

    Ok(())
}

fn run_slots(data: &PathBuf) -> Result<()> {
    let repo = JsonFileRepository::open(data);
    let config = repo.config()?;
    let slots = generate_slots(&config);
    for slot in &slots {
        println!(
            "day {} period {}: {}-{} min",
            slot.day_index, slot.period_index, slot.start_minutes, slot.end_minutes
        );
    }
    println!("{}", format!("{} slots generated", slots.len()).green());
    Ok(())
}

fn run_validate_move(data: &PathBuf, entry: i64, slot: i64, room: Option<i64>) -> Result<()> {
    let repo = JsonFileRepository::open(data);
    let violations = validate_move(
        &repo,
        TimetableEntryId(entry),
        TimeSlotId(slot),
        room.map(RoomId),
    )?;

    if violations.is_empty() {
        println!("{}", "ok".green().bold());
    } else {
        println!("{}", "rejected".red().bold());
        for v in &violations {
            println!("  - {}", v);
        }
    }
    Ok(())
}

fn run_report(
    data: &PathBuf,
    format: &str,
    output: Option<PathBuf>,
    teacher: Option<i64>,
    class: Option<i64>,
) -> Result<()> {
    let repo = JsonFileRepository::open(data);
    let entries = repo.list_timetable_entries()?;
    let slots = repo.list_timeslots()?;
    let classes = repo.list_classgroups()?;
    let teachers = repo.list_teachers()?;
    let subjects = repo.list_subjects()?;
    let rooms = repo.list_rooms()?;
    let conflict_reports = repo.list_conflict_reports()?;

    let ctx = ReportContext {
        entries: &entries,
        slots: &slots,
        classes: &classes,
        teachers: &teachers,
        subjects: &subjects,
        rooms: &rooms,
        conflict_reports: &conflict_reports,
    };

    if let Some(id) = teacher {
        match teacher_schedule_text(&ctx, TeacherId(id)) {
            Some(report) => println!("{}", report),
            None => println!("Teacher not found"),
        }
        return Ok(());
    }
    if let Some(id) = class {
        match class_schedule_text(&ctx, ClassId(id)) {
            Some(report) => println!("{}", report),
            None => println!("Class not found"),
        }
        return Ok(());
    }

    if let Some(output_dir) = output {
        let formats = parse_formats(format);
        write_reports(&ctx, &output_dir, &formats)?;
        println!("Reports written to: {}", output_dir.display().to_string().green());
        return Ok(());
    }

    match format {
        "json" => println!("{}", generate_json_report(&ctx)?),
        "markdown" | "md" => println!("{}", school_scheduler::reporter::generate_markdown_report(&ctx)),
        _ => println!("{}", school_scheduler::reporter::generate_text_report(&ctx)),
    }
    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }
    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn run_demo() -> Result<()> {
    println!("{}", "School Scheduler Demo".bold().cyan());
    println!("{}", "-".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    if !demo_path.join("config.toml").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    run_generate(&demo_path, 60, false)
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let config = SchoolConfig::default();
    std::fs::write(path.join("config.toml"), toml::to_string_pretty(&config)?)?;

    let subjects = vec![
        Subject {
            id: SubjectId(1),
            name: "Mathematics".into(),
            weekly_periods: 5,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Difficult,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        },
        Subject {
            id: SubjectId(2),
            name: "English".into(),
            weekly_periods: 4,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Fair,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        },
        Subject {
            id: SubjectId(3),
            name: "Biology".into(),
            weekly_periods: 3,
            kind: SubjectKind::Practical,
            difficulty: Difficulty::Difficult,
            required_room_type: RoomType::Lab,
            requires_consecutive_periods: true,
        },
        Subject {
            id: SubjectId(4),
            name: "Physical Education".into(),
            weekly_periods: 2,
            kind: SubjectKind::Practical,
            difficulty: Difficulty::Easy,
            required_room_type: RoomType::Gym,
            requires_consecutive_periods: false,
        },
    ];

    let teachers = vec![
        Teacher {
            id: TeacherId(1),
            name: "Ms. Anderson".into(),
            email: "anderson@example.edu".into(),
            competencies: BTreeSet::from([SubjectId(1)]),
            max_periods_week: 20,
            availability: Default::default(),
        },
        Teacher {
            id: TeacherId(2),
            name: "Mr. Baker".into(),
            email: "baker@example.edu".into(),
            competencies: BTreeSet::from([SubjectId(2)]),
            max_periods_week: 20,
            availability: Default::default(),
        },
        Teacher {
            id: TeacherId(3),
            name: "Dr. Clark".into(),
            email: "clark@example.edu".into(),
            competencies: BTreeSet::from([SubjectId(3)]),
            max_periods_week: 15,
            availability: Default::default(),
        },
        Teacher {
            id: TeacherId(4),
            name: "Coach Fisher".into(),
            email: "fisher@example.edu".into(),
            competencies: BTreeSet::from([SubjectId(4)]),
            max_periods_week: 20,
            availability: Default::default(),
        },
    ];

    let rooms = vec![
        Room {
            id: RoomId(1),
            name: "Room 101".into(),
            room_type: RoomType::Classroom,
            capacity: 30,
            availability: Default::default(),
        },
        Room {
            id: RoomId(2),
            name: "Room 102".into(),
            room_type: RoomType::Classroom,
            capacity: 30,
            availability: Default::default(),
        },
        Room {
            id: RoomId(3),
            name: "Science Lab".into(),
            room_type: RoomType::Lab,
            capacity: 24,
            availability: Default::default(),
        },
        Room {
            id: RoomId(4),
            name: "Gymnasium".into(),
            room_type: RoomType::Gym,
            capacity: 60,
            availability: Default::default(),
        },
    ];

    let classes = vec![
        ClassGroup {
            id: ClassId(1),
            name: "9A".into(),
            student_count: 25,
            required_subjects: BTreeSet::from([SubjectId(1), SubjectId(2), SubjectId(3), SubjectId(4)]),
        },
        ClassGroup {
            id: ClassId(2),
            name: "9B".into(),
            student_count: 22,
            required_subjects: BTreeSet::from([SubjectId(1), SubjectId(2), SubjectId(3), SubjectId(4)]),
        },
    ];

    let mut allocations = Vec::new();
    let mut next_id = 1;
    for class in &classes {
        for subject_id in &class.required_subjects {
            let teacher_id = teachers
                .iter()
                .find(|t| t.competencies.contains(subject_id))
                .map(|t| t.id)
                .unwrap();
            allocations.push(Allocation {
                id: AllocationId(next_id),
                class_id: class.id,
                subject_id: *subject_id,
                teacher_id,
            });
            next_id += 1;
        }
    }

    std::fs::write(path.join("subjects.json"), serde_json::to_string_pretty(&subjects)?)?;
    std::fs::write(path.join("teachers.json"), serde_json::to_string_pretty(&teachers)?)?;
    std::fs::write(path.join("rooms.json"), serde_json::to_string_pretty(&rooms)?)?;
    std::fs::write(path.join("classes.json"), serde_json::to_string_pretty(&classes)?)?;
    std::fs::write(path.join("allocations.json"), serde_json::to_string_pretty(&allocations)?)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
