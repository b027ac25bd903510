// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn holder() -> HolderId {
    HolderId::new("u1")
}

fn f4() -> ResourceCode {
    ResourceCode::new("f4")
}

#[parameterized(
    acquired = { Event::ClaimAcquired { holder: holder(), resource: f4(), minutes: 30 }, "claim:acquired" },
    expired = { Event::ClaimExpired { holder: holder(), resource: f4() }, "claim:expired" },
    enqueued = { Event::Enqueued { holder: holder(), resource: f4(), position: 1 }, "queue:enqueued" },
    offer_expired = { Event::OfferExpired { holder: holder(), resource: f4() }, "offer:expired" },
    freed = { Event::ResourceFreed { resource: f4() }, "resource:freed" },
)]
fn event_names(event: Event, expected: &str) {
    assert_eq!(event.name(), expected);
    assert_eq!(event.resource(), &f4());
}

#[test]
fn effect_names_and_fields() {
    let effect = Effect::Notify {
        holder: holder(),
        text: "hello".to_string(),
    };
    assert_eq!(effect.name(), "notify");
    assert_eq!(effect.fields(), vec![("holder", "u1".to_string())]);

    let effect = Effect::SaveQueue {
        record: QueueRecord::default(),
    };
    assert_eq!(effect.name(), "save_queue");
    assert_eq!(
        effect.fields(),
        vec![("entries", "0".to_string()), ("offers", "0".to_string())]
    );
}

#[test]
fn emit_fields_carry_event_name() {
    let effect = Effect::Emit(Event::ResourceFreed { resource: f4() });
    assert_eq!(effect.name(), "emit");
    assert_eq!(effect.fields(), vec![("event", "resource:freed".to_string())]);
}

#[test]
fn publish_board_counts_lines() {
    let effect = Effect::PublishBoard {
        text: "a\nb\nc".to_string(),
    };
    assert_eq!(effect.fields(), vec![("lines", "3".to_string())]);
}
