//! Behavioural tests for the group consensus reduction.
//!
//! Scenarios feed preferences in submission order to the consensus engine and
//! check the resulting plan or the reason none exists.

use chrono::NaiveDate;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use vacation_planner::domain::{
    ConsensusEngine, ConsensusError, ConsensusResult, Destination, TravelWindow, UserId,
    VacationPreference, VacationType,
};

#[derive(Default, ScenarioState)]
struct ConsensusWorld {
    engine: Slot<ConsensusEngine>,
    submissions: Slot<Vec<VacationPreference>>,
    outcome: Slot<Result<ConsensusResult, ConsensusError>>,
}

impl ConsensusWorld {
    fn outcome(&self) -> Result<ConsensusResult, ConsensusError> {
        self.outcome.get().expect("plan should have been computed")
    }
}

#[fixture]
fn world() -> ConsensusWorld {
    ConsensusWorld::default()
}

#[given("a group of {size} members")]
fn a_group_of_members(world: &ConsensusWorld, size: usize) {
    world.engine.set(ConsensusEngine::new(size));
    world.submissions.set(Vec::new());
}

#[given("member {id} prefers {destination} for {vacation_type} from {start} to {end}")]
fn member_prefers(
    world: &ConsensusWorld,
    id: i64,
    destination: String,
    vacation_type: String,
    start: NaiveDate,
    end: NaiveDate,
) {
    let mut submissions = world.submissions.get().unwrap_or_default();
    submissions.push(VacationPreference {
        user_id: UserId::from_raw(id),
        window: TravelWindow::from_stored(start, end),
        destination: Destination::from_stored(destination),
        vacation_type: VacationType::from_stored(vacation_type),
    });
    world.submissions.set(submissions);
}

#[when("the plan is computed")]
fn the_plan_is_computed(world: &ConsensusWorld) {
    let engine = world.engine.get().expect("group size configured");
    let submissions = world.submissions.get().unwrap_or_default();
    let first = engine.compute(&submissions);
    assert_eq!(
        engine.compute(&submissions),
        first,
        "recomputation must be identical"
    );
    world.outcome.set(first);
}

#[then("the plan waits for {required} submissions with {submitted} received")]
fn the_plan_waits(world: &ConsensusWorld, required: usize, submitted: usize) {
    assert_eq!(
        world.outcome(),
        Err(ConsensusError::InsufficientSubmissions {
            required,
            submitted
        })
    );
}

#[then("the plan runs from {start} to {end}")]
fn the_plan_runs(world: &ConsensusWorld, start: NaiveDate, end: NaiveDate) {
    let plan = world.outcome().expect("plan computed");
    assert_eq!((plan.start_date, plan.end_date), (start, end));
}

#[then("the plan goes to {destination} for a {vacation_type} vacation")]
fn the_plan_goes_to(world: &ConsensusWorld, destination: String, vacation_type: String) {
    let plan = world.outcome().expect("plan computed");
    assert_eq!(plan.destination.as_ref(), destination);
    assert_eq!(plan.vacation_type.as_ref(), vacation_type);
}

#[then("no overlapping window is found between {start} and {end}")]
fn no_overlap(world: &ConsensusWorld, start: NaiveDate, end: NaiveDate) {
    assert_eq!(world.outcome(), Err(ConsensusError::NoOverlap { start, end }));
}

#[scenario(
    path = "tests/features/vacation_consensus.feature",
    name = "Plan waits for every member"
)]
fn plan_waits_for_every_member(world: ConsensusWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/vacation_consensus.feature",
    name = "Latest start and earliest end bound the window"
)]
fn latest_start_and_earliest_end_bound_the_window(world: ConsensusWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/vacation_consensus.feature",
    name = "Ties favour the earliest submission"
)]
fn ties_favour_the_earliest_submission(world: ConsensusWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/vacation_consensus.feature",
    name = "Disjoint windows have no plan"
)]
fn disjoint_windows_have_no_plan(world: ConsensusWorld) {
    let _ = world;
}
