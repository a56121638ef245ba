use crate::scheduler::candidate_enumerator::EnumerationResult;
use crate::types::{
    Allocation, AllocationId, ClassId, Difficulty, RoomId, SchoolConfig, Subject, SubjectId,
    Teacher, TeacherId, TimeSlot, TimeSlotId,
};
use good_lp::{constraint, variable, variables, Constraint, Expression, ProblemVariables, Variable};
use std::collections::{BTreeMap, BTreeSet};

/// +5 per teacher gap (a free period sandwiched between two busy ones).
pub const GAP_PENALTY_WEIGHT: f64 = 5.0;
/// -2 per difficult-subject lesson placed in the first two periods of a day.
pub const EARLY_DIFFICULT_WEIGHT: f64 = -2.0;
/// +1 per unit of a teacher's peak daily load.
pub const DAILY_BALANCE_WEIGHT: f64 = 1.0;
/// -50 per allocation-period that managed to place at least one candidate.
pub const ALLOCATION_PRESENCE_WEIGHT: f64 = -50.0;

/// The fully assembled MILP model: decision variables, hard constraints and
/// the weighted soft objective, still engine-agnostic (no `.using(...)` has
/// been called). `backend.rs` turns this into a concrete solve.
pub struct TimetableModel {
    pub vars: ProblemVariables,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
    /// Parallel to `EnumerationResult::candidates`.
    pub candidate_vars: Vec<Variable>,
    /// Allocations whose consecutive-block requirement (H5) could not be
    /// modeled because no room served every offset of the block.
    pub h5_infeasible_allocations: Vec<AllocationId>,
}

struct Ctx<'a> {
    subjects_by_id: BTreeMap<SubjectId, &'a Subject>,
    teachers_by_id: BTreeMap<TeacherId, &'a Teacher>,
    slot_by_day_period: BTreeMap<(u8, u32), TimeSlotId>,
    slot_period_index: BTreeMap<TimeSlotId, u32>,
    periods_by_day: BTreeMap<u8, Vec<u32>>,
}

pub fn build_model(
    _config: &SchoolConfig,
    allocations: &[Allocation],
    subjects: &[Subject],
    teachers: &[Teacher],
    enum_result: &EnumerationResult,
    slots: &[TimeSlot],
) -> TimetableModel {
    let ctx = Ctx {
        subjects_by_id: subjects.iter().map(|s| (s.id, s)).collect(),
        teachers_by_id: teachers.iter().map(|t| (t.id, t)).collect(),
        slot_by_day_period: slots.iter().map(|s| (s.key(), s.id)).collect(),
        slot_period_index: slots.iter().map(|s| (s.id, s.period_index)).collect(),
        periods_by_day: {
            let mut m: BTreeMap<u8, Vec<u32>> = BTreeMap::new();
            for s in slots {
                m.entry(s.day_index).or_default().push(s.period_index);
            }
            for v in m.values_mut() {
                v.sort_unstable();
            }
            m
        },
    };

    let mut vars = variables!();
    let candidate_vars: Vec<Variable> = enum_result
        .candidates
        .iter()
        .map(|_| vars.add(variable().binary()))
        .collect();

    let mut constraints = Vec::new();
    let mut objective = Expression::default();

    emit_h1(&ctx, allocations, enum_result, &candidate_vars, &mut constraints);
    emit_uniqueness(enum_result, &candidate_vars, &mut constraints);
    let h5_infeasible = emit_h5(
        &ctx,
        allocations,
        enum_result,
        &candidate_vars,
        &mut vars,
        &mut constraints,
    );

    emit_teacher_gap_penalty(
        &ctx,
        teachers,
        enum_result,
        &candidate_vars,
        &mut vars,
        &mut constraints,
        &mut objective,
    );
    emit_early_difficult_bias(&ctx, enum_result, &candidate_vars, &mut objective);
    emit_daily_balance(
        &ctx,
        teachers,
        enum_result,
        &candidate_vars,
        &mut vars,
        &mut constraints,
        &mut objective,
    );
    emit_allocation_presence(
        enum_result,
        &candidate_vars,
        &mut vars,
        &mut constraints,
        &mut objective,
    );

    TimetableModel {
        vars,
        objective,
        constraints,
        candidate_vars,
        h5_infeasible_allocations: h5_infeasible,
    }
}

fn sum_expr(indices: &[usize], candidate_vars: &[Variable]) -> Expression {
    indices.iter().map(|&i| Expression::from(candidate_vars[i])).sum()
}

/// H1: each required period of each allocation is assigned exactly once,
/// when at least one candidate exists for it.
fn emit_h1(
    ctx: &Ctx,
    allocations: &[Allocation],
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
    constraints: &mut Vec<Constraint>,
) {
    for allocation in allocations {
        let Some(subject) = ctx.subjects_by_id.get(&allocation.subject_id) else {
            continue;
        };
        let locked = enum_result
            .locked_period_counts
            .get(&allocation.id)
            .copied()
            .unwrap_or(0);
        let periods_needed = subject.weekly_periods.saturating_sub(locked);

        for p in 0..periods_needed {
            let Some(indices) = enum_result.index.by_allocation_period.get(&(allocation.id, p))
            else {
                continue; // zero candidates: allocation flagged, no constraint emitted
            };
            if indices.is_empty() {
                continue;
            }
            let sum = sum_expr(indices, candidate_vars);
            constraints.push(constraint!(sum == 1));
        }
    }
}

/// H2-H4: teacher, class and room uniqueness per slot.
fn emit_uniqueness(
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
    constraints: &mut Vec<Constraint>,
) {
    for indices in enum_result.index.by_teacher_slot.values() {
        if indices.len() > 1 {
            let sum = sum_expr(indices, candidate_vars);
            constraints.push(constraint!(sum <= 1));
        }
    }
    for indices in enum_result.index.by_class_slot.values() {
        if indices.len() > 1 {
            let sum = sum_expr(indices, candidate_vars);
            constraints.push(constraint!(sum <= 1));
        }
    }
    for indices in enum_result.index.by_room_slot.values() {
        if indices.len() > 1 {
            let sum = sum_expr(indices, candidate_vars);
            constraints.push(constraint!(sum <= 1));
        }
    }
}

/// H5: consecutive-block placement via start indicators.
#[allow(clippy::too_many_arguments)]
fn emit_h5(
    ctx: &Ctx,
    allocations: &[Allocation],
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
) -> Vec<AllocationId> {
    let mut infeasible = Vec::new();

    for allocation in allocations {
        let Some(subject) = ctx.subjects_by_id.get(&allocation.subject_id) else {
            continue;
        };
        if !subject.requires_consecutive_periods {
            continue;
        }
        let locked = enum_result
            .locked_period_counts
            .get(&allocation.id)
            .copied()
            .unwrap_or(0);
        let k = subject.weekly_periods.saturating_sub(locked);
        if k < 2 {
            continue;
        }

        // R_A: rooms appearing in at least one candidate tuple for this
        // allocation, across every offset.
        let mut rooms_for_allocation: BTreeSet<RoomId> = BTreeSet::new();
        for p in 0..k {
            if let Some(indices) = enum_result.index.by_allocation_period.get(&(allocation.id, p)) {
                for &i in indices {
                    rooms_for_allocation.insert(enum_result.candidates[i].room_id);
                }
            }
        }
        if rooms_for_allocation.is_empty() {
            infeasible.push(allocation.id);
            continue;
        }

        let mut starts: Vec<Variable> = Vec::new();

        for (&day, periods) in &ctx.periods_by_day {
            for &i in periods {
                // slots (day,i)..(day,i+k-1) must all exist and be
                // consecutive by period_index.
                let block: Vec<u32> = (i..i + k).collect();
                if !block.iter().all(|p| periods.contains(p)) {
                    continue;
                }

                for &room in &rooms_for_allocation {
                    // For every offset j, find the (at most one) candidate
                    // variable matching (allocation, j, room, slot(day,i+j)).
                    let mut offset_vars = Vec::with_capacity(k as usize);
                    let mut complete = true;
                    for (j, &period) in block.iter().enumerate() {
                        let Some(&slot_id) = ctx.slot_by_day_period.get(&(day, period)) else {
                            complete = false;
                            break;
                        };
                        let found = enum_result
                            .index
                            .by_allocation_period
                            .get(&(allocation.id, j as u32))
                            .into_iter()
                            .flatten()
                            .find(|&&idx| {
                                let c = &enum_result.candidates[idx];
                                c.room_id == room && c.slot_id == slot_id
                            })
                            .map(|&idx| candidate_vars[idx]);
                        match found {
                            Some(v) => offset_vars.push(v),
                            None => {
                                complete = false;
                                break;
                            }
                        }
                    }

                    if !complete {
                        continue;
                    }

                    let y = vars.add(variable().binary());
                    for &x in &offset_vars {
                        constraints.push(constraint!(y <= x));
                    }
                    starts.push(y);
                }
            }
        }

        if starts.is_empty() {
            infeasible.push(allocation.id);
            continue;
        }

        let sum: Expression = starts.into_iter().map(Expression::from).sum();
        constraints.push(constraint!(sum == 1));
    }

    infeasible
}

/// +5 per teacher gap: a free period strictly between two busy ones, within
/// a run of three consecutive periods on the same day.
#[allow(clippy::too_many_arguments)]
fn emit_teacher_gap_penalty(
    ctx: &Ctx,
    teachers: &[Teacher],
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    objective: &mut Expression,
) {
    for teacher in teachers {
        for (&day, periods) in &ctx.periods_by_day {
            for window in periods.windows(3) {
                let (p0, p1, p2) = (window[0], window[1], window[2]);
                if p1 != p0 + 1 || p2 != p1 + 1 {
                    continue; // not actually consecutive period indices
                }
                let has_before = teacher_slot_sum(ctx, teacher.id, day, p0, enum_result, candidate_vars);
                let has_middle = teacher_slot_sum(ctx, teacher.id, day, p1, enum_result, candidate_vars);
                let has_after = teacher_slot_sum(ctx, teacher.id, day, p2, enum_result, candidate_vars);

                let gap = vars.add(variable().binary());
                let not_middle: Expression = Expression::from(1.0) - has_middle.clone();
                constraints.push(constraint!(gap.clone() <= has_before.clone()));
                constraints.push(constraint!(gap.clone() <= not_middle.clone()));
                constraints.push(constraint!(gap.clone() <= has_after.clone()));
                constraints.push(constraint!(
                    gap.clone() >= has_before + not_middle + has_after - 2.0
                ));

                *objective += GAP_PENALTY_WEIGHT * gap;
            }
        }
    }
}

fn teacher_slot_sum(
    ctx: &Ctx,
    teacher_id: TeacherId,
    day: u8,
    period: u32,
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
) -> Expression {
    let Some(&slot_id) = ctx.slot_by_day_period.get(&(day, period)) else {
        return Expression::default();
    };
    match enum_result.index.by_teacher_slot.get(&(teacher_id, slot_id)) {
        Some(indices) => sum_expr(indices, candidate_vars),
        None => Expression::default(),
    }
}

/// -2 per difficult-subject candidate whose actual timetable period index
/// (not the allocation-relative `Candidate::period_index`) is 0 or 1.
fn emit_early_difficult_bias(
    ctx: &Ctx,
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
    objective: &mut Expression,
) {
    for (i, candidate) in enum_result.candidates.iter().enumerate() {
        let Some(subject) = ctx.subjects_by_id.get(&candidate.subject_id) else {
            continue;
        };
        if subject.difficulty != Difficulty::Difficult {
            continue;
        }
        let Some(&period_index) = ctx.slot_period_index.get(&candidate.slot_id) else {
            continue;
        };
        if period_index <= 1 {
            *objective += EARLY_DIFFICULT_WEIGHT * candidate_vars[i];
        }
    }
}

/// +1 per unit of a teacher's peak daily load.
#[allow(clippy::too_many_arguments)]
fn emit_daily_balance(
    ctx: &Ctx,
    teachers: &[Teacher],
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    objective: &mut Expression,
) {
    for teacher in teachers {
        let max_daily = vars.add(variable().integer().min(0.0));
        for &day in ctx.periods_by_day.keys() {
            let periods = &ctx.periods_by_day[&day];
            let mut daily_load = Expression::default();
            for &p in periods {
                daily_load += teacher_slot_sum(ctx, teacher.id, day, p, enum_result, candidate_vars);
            }
            constraints.push(constraint!(max_daily >= daily_load));
        }
        *objective += DAILY_BALANCE_WEIGHT * max_daily;
    }
}

/// -50 per (allocation, period) that placed at least one candidate. The
/// reified boolean is tied to the H1 sum by equality rather than a full
/// `OnlyEnforceIf`, because H1 already bounds that sum to {0,1} whenever it
/// is emitted.
fn emit_allocation_presence(
    enum_result: &EnumerationResult,
    candidate_vars: &[Variable],
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    objective: &mut Expression,
) {
    for (_key, indices) in &enum_result.index.by_allocation_period {
        if indices.is_empty() {
            continue;
        }
        let sum = sum_expr(indices, candidate_vars);
        let alloc_present = vars.add(variable().binary());
        constraints.push(constraint!(alloc_present == sum));
        *objective += ALLOCATION_PRESENCE_WEIGHT * alloc_present;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::candidate_enumerator::enumerate_candidates;
    use crate::types::{ClassGroup, Room, RoomType, SubjectKind};
    use std::collections::BTreeSet;

    fn fixture() -> (
        SchoolConfig,
        Vec<Allocation>,
        Vec<ClassGroup>,
        Vec<Subject>,
        Vec<Teacher>,
        Vec<Room>,
        Vec<TimeSlot>,
    ) {
        let config = SchoolConfig {
            days_per_week: 5,
            lesson_start_minutes: 480,
            lesson_duration_min: 45,
            periods_before_break: 4,
            break_duration_min: 15,
            periods_after_break: 0,
            lunch_duration_min: 0,
        };
        let slots = crate::scheduler::time_slot_generator::generate_slots(&config);
        let class = ClassGroup {
            id: ClassId(1),
            name: "9A".into(),
            student_count: 25,
            required_subjects: BTreeSet::new(),
        };
        let subject = Subject {
            id: SubjectId(1),
            name: "Math".into(),
            weekly_periods: 2,
            kind: SubjectKind::Theory,
            difficulty: Difficulty::Easy,
            required_room_type: RoomType::Classroom,
            requires_consecutive_periods: false,
        };
        let mut competencies = BTreeSet::new();
        competencies.insert(subject.id);
        let teacher = Teacher {
            id: TeacherId(1),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            competencies,
            max_periods_week: 20,
            availability: Default::default(),
        };
        let room = Room {
            id: RoomId(1),
            name: "R1".into(),
            room_type: RoomType::Classroom,
            capacity: 30,
            availability: Default::default(),
        };
        let allocation = Allocation {
            id: AllocationId(1),
            class_id: class.id,
            subject_id: subject.id,
            teacher_id: teacher.id,
        };
        (config, vec![allocation], vec![class], vec![subject], vec![teacher], vec![room], slots)
    }

    #[test]
    fn builds_one_variable_per_candidate() {
        let (config, allocations, classes, subjects, teachers, rooms, slots) = fixture();
        let enum_result = enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[]);
        let model = build_model(&config, &allocations, &subjects, &teachers, &enum_result, &slots);
        assert_eq!(model.candidate_vars.len(), enum_result.candidates.len());
        assert!(model.h5_infeasible_allocations.is_empty());
    }

    #[test]
    fn h1_constraints_are_emitted_for_every_satisfiable_period() {
        let (config, allocations, classes, subjects, teachers, rooms, slots) = fixture();
        let enum_result = enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[]);
        let model = build_model(&config, &allocations, &subjects, &teachers, &enum_result, &slots);
        // at least 2 H1 equalities (one per weekly period)
        assert!(model.constraints.len() >= 2);
    }

    #[test]
    fn h5_forces_a_block_onto_two_adjacent_periods_on_the_same_day() {
        use crate::scheduler::backend::{resolved, ConstraintSolver, HighsSolver};

        let (config, allocations, classes, mut subjects, teachers, rooms, slots) = fixture();
        subjects[0].requires_consecutive_periods = true;
        let enum_result = enumerate_candidates(&allocations, &classes, &subjects, &teachers, &rooms, &slots, &[]);
        let model = build_model(&config, &allocations, &subjects, &teachers, &enum_result, &slots);
        assert!(model.h5_infeasible_allocations.is_empty());
        // one start-indicator per (day, start-offset, room): 5 days x 3 valid
        // starts (periods 0,1,2 within a 4-period morning) x 1 room
        let start_count = 5 * 3;
        // 2 "y <= x" constraints per start, plus one "sum(y) == 1"
        let h5_constraint_count = start_count * 2 + 1;
        assert!(model.constraints.len() >= h5_constraint_count);

        let solver = HighsSolver;
        let (status, values) = solver
            .solve(model.vars, model.objective, model.constraints, &model.candidate_vars, 10, 1)
            .unwrap();
        assert!(status.is_success());

        let placed: Vec<_> = model
            .candidate_vars
            .iter()
            .enumerate()
            .filter(|(_, &v)| resolved(&values, v))
            .map(|(i, _)| &enum_result.candidates[i])
            .collect();
        assert_eq!(placed.len(), 2);

        let slot_by_id: BTreeMap<_, _> = slots.iter().map(|s| (s.id, s)).collect();
        let mut resolved_slots: Vec<_> = placed.iter().map(|c| slot_by_id[&c.slot_id]).collect();
        resolved_slots.sort_by_key(|s| s.period_index);

        assert_eq!(resolved_slots[0].day_index, resolved_slots[1].day_index);
        assert_eq!(
            resolved_slots[1].period_index,
            resolved_slots[0].period_index + 1
        );
        assert_eq!(placed[0].room_id, placed[1].room_id);
    }
}
