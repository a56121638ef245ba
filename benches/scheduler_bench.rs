use criterion::{criterion_group, criterion_main, Criterion};
use school_scheduler::scheduler::{build_model, enumerate_candidates, generate_slots};
use school_scheduler::types::{
    Allocation, AllocationId, ClassGroup, ClassId, Difficulty, Room, RoomId, RoomType,
    SchoolConfig, Subject, SubjectId, SubjectKind, Teacher, TeacherId,
};
use std::collections::BTreeSet;

fn synthetic_school(num_classes: usize) -> (SchoolConfig, Vec<ClassGroup>, Vec<Subject>, Vec<Teacher>, Vec<Room>, Vec<Allocation>) {
    let config = SchoolConfig::default();

    let subjects: Vec<Subject> = (0..6)
        .map(|i| Subject {
            id: SubjectId(i as i64 + 1),
            name: format!("Subject {i}"),
            weekly_periods: 4,
            kind: if i % 3 == 0 { SubjectKind::Practical } else { SubjectKind::Theory },
            difficulty: if i % 2 == 0 { Difficulty::Difficult } else { Difficulty::Fair },
            required_room_type: if i % 3 == 0 { RoomType::Lab } else { RoomType::Classroom },
            requires_consecutive_periods: i % 3 == 0,
        })
        .collect();

    let teachers: Vec<Teacher> = (0..subjects.len())
        .map(|i| Teacher {
            id: TeacherId(i as i64 + 1),
            name: format!("Teacher {i}"),
            email: format!("t{i}@example.edu"),
            competencies: BTreeSet::from([subjects[i].id]),
            max_periods_week: 30,
            availability: Default::default(),
        })
        .collect();

    let rooms = vec![
        Room { id: RoomId(1), name: "R1".into(), room_type: RoomType::Classroom, capacity: 35, availability: Default::default() },
        Room { id: RoomId(2), name: "R2".into(), room_type: RoomType::Classroom, capacity: 35, availability: Default::default() },
        Room { id: RoomId(3), name: "Lab".into(), room_type: RoomType::Lab, capacity: 24, availability: Default::default() },
    ];

    let classes: Vec<ClassGroup> = (0..num_classes)
        .map(|i| ClassGroup {
            id: ClassId(i as i64 + 1),
            name: format!("Class {i}"),
            student_count: 25,
            required_subjects: subjects.iter().map(|s| s.id).collect(),
        })
        .collect();

    let mut allocations = Vec::new();
    let mut next_id = 1;
    for class in &classes {
        for subject in &subjects {
            let teacher_id = teachers.iter().find(|t| t.competencies.contains(&subject.id)).unwrap().id;
            allocations.push(Allocation {
                id: AllocationId(next_id),
                class_id: class.id,
                subject_id: subject.id,
                teacher_id,
            });
            next_id += 1;
        }
    }

    (config, classes, subjects, teachers, rooms, allocations)
}

fn bench_candidate_enumeration(c: &mut Criterion) {
    let (config, classes, subjects, teachers, rooms, allocations) = synthetic_school(8);
    let slots = generate_slots(&config);

    c.bench_function("enumerate_candidates_8_classes", |b| {
        b.iter(|| {
            enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[])
        })
    });
}

fn bench_model_build(c: &mut Criterion) {
    let (config, classes, subjects, teachers, rooms, allocations) = synthetic_school(8);
    let slots = generate_slots(&config);
    let enum_result =
        enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[]);

    c.bench_function("build_model_8_classes", |b| {
        b.iter(|| build_model(&config, &allocations, &subjects, &teachers, &enum_result, &slots))
    });
}

criterion_group!(benches, bench_candidate_enumeration, bench_model_build);
criterion_main!(benches);
