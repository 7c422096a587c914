//! When steps for group collaboration BDD scenarios.

use super::world::{ADMIN, GroupWorld, SUPERVISOR, run_async};
use capstone::identity::{
    domain::{Actor, Session},
    ports::ActorDirectory,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the supervisor promotes "{member}" to head"#)]
fn promote(world: &mut GroupWorld, member: String) -> Result<(), eyre::Report> {
    let member_id = world.person(&member)?.actor_id();
    let result = run_async(world.groups.promote_to_head(
        world.person(SUPERVISOR)?,
        world.project_id()?,
        member_id,
    ));
    world.record(result);
    Ok(())
}

#[when(r#"the supervisor removes "{member}" from the group"#)]
fn remove(world: &mut GroupWorld, member: String) -> Result<(), eyre::Report> {
    let member_id = world.person(&member)?.actor_id();
    let result = run_async(world.groups.remove_member(
        world.person(SUPERVISOR)?,
        world.project_id()?,
        member_id,
    ));
    world.record(result);
    Ok(())
}

#[when(r#""{author}" posts "{text}" to the project channel"#)]
fn post(world: &mut GroupWorld, author: String, text: String) -> Result<(), eyre::Report> {
    let result = run_async(
        world
            .chat
            .post(world.person(&author)?, world.project_id()?, &text),
    );
    world.record(result);
    Ok(())
}

#[when(r#"the administrator allocates student "{name}" to the supervisor"#)]
fn allocate(world: &mut GroupWorld, name: String) -> Result<(), eyre::Report> {
    let student = Actor::student(name.as_str(), &world.clock)?;
    run_async(world.directory.register(&student)).wrap_err("register latecomer")?;
    world
        .people
        .insert(name, Session::for_actor(&student));
    let supervisor_id = world.person(SUPERVISOR)?.actor_id();
    let result = run_async(world.allocation.authorize(
        world.person(ADMIN)?,
        student.id(),
        supervisor_id,
    ));
    world.record(result);
    Ok(())
}
