//! Given steps for group collaboration BDD scenarios.

use super::world::{ADMIN, GroupWorld, SUPERVISOR, run_async};
use capstone::{
    identity::{
        domain::{Actor, Session},
        ports::ActorDirectory,
    },
    project::{domain::ProjectType, services::CreateProjectRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn enrol(world: &mut GroupWorld, name: &str, actor: &Actor) -> Result<(), eyre::Report> {
    run_async(world.directory.register(actor)).wrap_err("register scenario actor")?;
    world
        .people
        .insert(name.to_owned(), Session::for_actor(actor));
    Ok(())
}

fn names(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|name| !name.is_empty())
}

#[given(r#"a group project with members "{members}""#)]
fn group_project(world: &mut GroupWorld, members: String) -> Result<(), eyre::Report> {
    let supervisor = Actor::supervisor("Dr. Okafor", 10, &world.clock)?;
    enrol(world, SUPERVISOR, &supervisor)?;
    let mut ids = Vec::new();
    for name in names(&members) {
        let student = Actor::student(name, &world.clock)?;
        enrol(world, name, &student)?;
        ids.push(student.id());
    }
    let request = CreateProjectRequest::new("Group build", "Team capstone")
        .with_type(ProjectType::Group)
        .with_assignees(ids);
    let project = run_async(
        world
            .lifecycle
            .create_project(world.person(SUPERVISOR)?, request),
    )
    .wrap_err("create group project")?;
    world.project_id = Some(project.id());
    Ok(())
}

#[given(r#""{member}" is the project head"#)]
fn head_is(world: &mut GroupWorld, member: String) -> Result<(), eyre::Report> {
    let member_id = world.person(&member)?.actor_id();
    run_async(world.groups.promote_to_head(
        world.person(SUPERVISOR)?,
        world.project_id()?,
        member_id,
    ))
    .wrap_err("promote scenario head")?;
    Ok(())
}

#[given("a supervisor with capacity {capacity:u32} and {allocated:u32} allocated students")]
fn loaded_supervisor(
    world: &mut GroupWorld,
    capacity: u32,
    allocated: u32,
) -> Result<(), eyre::Report> {
    let admin = Actor::super_admin("Registrar", &world.clock)?;
    enrol(world, ADMIN, &admin)?;
    let supervisor = Actor::supervisor("Dr. Okafor", capacity, &world.clock)?;
    enrol(world, SUPERVISOR, &supervisor)?;
    for index in 0..allocated {
        let student = Actor::student(format!("Student {index}"), &world.clock)?;
        run_async(world.directory.register(&student)).wrap_err("register student")?;
        run_async(world.allocation.authorize(
            world.person(ADMIN)?,
            student.id(),
            supervisor.id(),
        ))
        .wrap_err("allocate student")?;
    }
    Ok(())
}
