//! Report building for decoded events.

use serde_json::Value;
use tracing::warn;

use crate::domain::entities::{Message, PartialMessage};
use crate::domain::ports::{EventReport, MessageFacts};
use crate::domain::undefined::UndefinedOr;
use crate::infrastructure::discord::{DispatchEvent, SequencedEvent};

/// Facts about a fully known message. Nothing is left undefined except
/// member data outside guilds.
#[must_use]
pub fn message_facts(message: &Message) -> MessageFacts {
    let author = message
        .member()
        .map_or_else(|| message.author().display_name(), |member| member.display_name());

    MessageFacts {
        author: UndefinedOr::Defined(author),
        is_webhook: UndefinedOr::Defined(message.is_webhook()),
        is_human: UndefinedOr::Defined(message.is_human()),
        has_member: UndefinedOr::Defined(message.member().is_some()),
        undefined_fields: Vec::new(),
    }
}

/// Facts about a partial message, keeping what the payload did not say.
#[must_use]
pub fn partial_message_facts(message: &PartialMessage) -> MessageFacts {
    let author = match (&message.member, &message.author) {
        (UndefinedOr::Defined(member), _) => UndefinedOr::Defined(member.display_name()),
        (UndefinedOr::Undefined, author) => author.as_ref().map(|user| user.display_name()),
    };

    MessageFacts {
        author,
        is_webhook: message.is_webhook(),
        is_human: message.is_human(),
        has_member: message.member.as_ref().map(|_| true),
        undefined_fields: undefined_fields(message),
    }
}

fn undefined_fields(message: &PartialMessage) -> Vec<&'static str> {
    [
        ("author", message.author.is_undefined()),
        ("member", message.member.is_undefined()),
        ("content", message.content.is_undefined()),
        ("timestamp", message.timestamp.is_undefined()),
        ("edited_timestamp", message.edited_timestamp.is_undefined()),
        ("tts", message.tts.is_undefined()),
        ("mention_everyone", message.mention_everyone.is_undefined()),
        ("mentions", message.mentions.is_undefined()),
        ("mention_roles", message.mention_roles.is_undefined()),
        ("attachments", message.attachments.is_undefined()),
        ("embeds", message.embeds.is_undefined()),
        ("reactions", message.reactions.is_undefined()),
        ("pinned", message.pinned.is_undefined()),
        ("webhook_id", message.webhook_id.is_undefined()),
        ("type", message.kind.is_undefined()),
        ("flags", message.flags.is_undefined()),
        ("application_id", message.application_id.is_undefined()),
        ("message_reference", message.reference.is_undefined()),
        ("referenced_message", message.referenced.is_undefined()),
    ]
    .into_iter()
    .filter_map(|(name, undefined)| undefined.then_some(name))
    .collect()
}

/// Builds the report for the event decoded from a capture line.
#[must_use]
pub fn event_report(line: usize, sequenced: &SequencedEvent) -> EventReport {
    let event = &sequenced.event;
    let detail = serde_json::to_value(event).unwrap_or_else(|e| {
        warn!(line, error = %e, "Failed to re-encode event");
        Value::Null
    });

    let report = EventReport::new(line, event.event_name())
        .with_sequence(sequenced.sequence)
        .with_ids(event.channel_id(), event.guild_id(), event.message_id())
        .with_detail(detail);

    match event {
        DispatchEvent::MessageCreate(create) => report.with_message(message_facts(&create.message)),
        DispatchEvent::MessageUpdate(update) => {
            report.with_message(partial_message_facts(&update.message))
        }
        _ => report,
    }
}
