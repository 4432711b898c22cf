//! Then steps for direct message BDD scenarios.

use super::world::{MessagingWorld, parsed_user, run_async, user_id};
use postbox::direct_message::{services::MessageServiceError, validation::Field};
use rstest_bdd_macros::then;

#[then(r#"the conversation between {first} and {second} reads "{earlier}" then "{later}""#)]
fn conversation_reads(
    world: &mut MessagingWorld,
    first: String,
    second: String,
    earlier: String,
    later: String,
) -> Result<(), eyre::Report> {
    let conversation = run_async(
        world
            .store
            .conversation_between(user_id(&first)?, user_id(&second)?),
    )
    .map_err(|err| eyre::eyre!("conversation query failed: {err}"))?;

    let texts: Vec<&str> = conversation.iter().map(|m| m.text().as_str()).collect();
    if texts != [earlier.as_str(), later.as_str()] {
        return Err(eyre::eyre!("unexpected conversation order: {texts:?}"));
    }
    if conversation.iter().any(|m| m.is_read()) {
        return Err(eyre::eyre!("new messages should start unread"));
    }
    world.conversation = conversation;
    Ok(())
}

#[then("the conversation looks the same from {name}'s side")]
fn conversation_symmetric(world: &mut MessagingWorld, name: String) -> Result<(), eyre::Report> {
    let viewer = parsed_user(&name)?;
    let other = world
        .conversation
        .iter()
        .flat_map(|m| [m.sender_id(), m.receiver_id()])
        .find(|id| **id != viewer)
        .cloned()
        .ok_or_else(|| eyre::eyre!("no counterpart in recorded conversation"))?;

    let mirrored = run_async(world.store.conversation_between(viewer.as_str(), other.as_str()))
        .map_err(|err| eyre::eyre!("conversation query failed: {err}"))?;
    if mirrored != world.conversation {
        return Err(eyre::eyre!("conversation differs when queried from {name}"));
    }
    Ok(())
}

#[then("{receiver} has {count:usize} unread message from {sender}")]
fn unread_from(
    world: &mut MessagingWorld,
    receiver: String,
    count: usize,
    sender: String,
) -> Result<(), eyre::Report> {
    let counts = run_async(world.unread.unread_counts_for(user_id(&receiver)?))
        .map_err(|err| eyre::eyre!("unread query failed: {err}"))?;
    let expected = u64::try_from(count)?;
    let actual = counts.get(&parsed_user(&sender)?);
    if actual != expected || counts.total() != expected {
        return Err(eyre::eyre!(
            "expected {receiver} to have exactly {expected} unread from {sender}, got {counts:?}"
        ));
    }
    Ok(())
}

#[then("{receiver} has no unread messages")]
fn no_unread(world: &mut MessagingWorld, receiver: String) -> Result<(), eyre::Report> {
    let counts = run_async(world.unread.unread_counts_for(user_id(&receiver)?))
        .map_err(|err| eyre::eyre!("unread query failed: {err}"))?;
    if !counts.is_empty() {
        return Err(eyre::eyre!("expected no unread messages, got {counts:?}"));
    }
    Ok(())
}

#[then(r#"the send is rejected for the "{field}" field"#)]
fn send_rejected(world: &MessagingWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_append
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no append attempted in scenario world"))?;
    let Err(MessageServiceError::Validation(err)) = result else {
        return Err(eyre::eyre!("expected a validation error, got {result:?}"));
    };
    let flagged: Vec<Field> = err.errors().iter().map(|(f, _)| f).collect();
    if !flagged.iter().any(|f| f.as_str() == field) || flagged.len() != 1 {
        return Err(eyre::eyre!("expected only '{field}' to be flagged, got {flagged:?}"));
    }
    Ok(())
}

#[then("the store holds {count:usize} messages")]
fn store_holds(world: &mut MessagingWorld, count: usize) -> Result<(), eyre::Report> {
    let all = run_async(world.store.list_all())
        .map_err(|err| eyre::eyre!("list failed: {err}"))?;
    if all.len() != count {
        return Err(eyre::eyre!("expected {count} messages, found {}", all.len()));
    }
    Ok(())
}

#[then("{count:usize} messages were marked as read")]
fn marked_count(world: &MessagingWorld, count: usize) -> Result<(), eyre::Report> {
    let updated = world
        .last_updated
        .ok_or_else(|| eyre::eyre!("no mark-read call recorded"))?;
    if updated != u64::try_from(count)? {
        return Err(eyre::eyre!("expected {count} updates, got {updated}"));
    }
    Ok(())
}

#[then("the unread query is rejected as invalid")]
fn unread_rejected(world: &MessagingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_unread
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no unread query recorded"))?;
    if !matches!(result, Err(MessageServiceError::Validation(_))) {
        return Err(eyre::eyre!("expected a validation error, got {result:?}"));
    }
    Ok(())
}
