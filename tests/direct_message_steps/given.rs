//! Given steps for direct message BDD scenarios.

use super::world::{MessagingWorld, run_async, user_id};
use eyre::WrapErr;
use postbox::direct_message::services::AppendMessageRequest;
use rstest_bdd_macros::given;

#[given("an empty message store")]
fn empty_store(world: &mut MessagingWorld) -> Result<(), eyre::Report> {
    let all = run_async(world.store.list_all()).wrap_err("list messages")?;
    if !all.is_empty() {
        return Err(eyre::eyre!("expected an empty store, found {}", all.len()));
    }
    Ok(())
}

#[given("{sender} has already sent {count:usize} messages to {receiver}")]
fn already_sent(
    world: &mut MessagingWorld,
    sender: String,
    count: usize,
    receiver: String,
) -> Result<(), eyre::Report> {
    let from = user_id(&sender)?;
    let to = user_id(&receiver)?;
    for n in 0..count {
        let request = AppendMessageRequest::new(from, to, format!("message {n}"));
        run_async(world.store.append(request)).wrap_err("append setup message")?;
    }
    Ok(())
}
