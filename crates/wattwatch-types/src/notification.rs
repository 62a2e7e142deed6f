// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of WattWatch.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use serde::{Deserialize, Serialize};

use crate::pricing::PricePoint;

/// Direction of an imminent threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// The next hour enters the high-price classification.
    Rising,
    /// The next hour leaves the high-price classification.
    Falling,
}

/// One-shot advisory that the high/low price classification changes at the
/// top of the next hour.
///
/// Events have no identity: the evaluator produces a fresh one (or none)
/// every tick, and the consumer holds at most one at a time. The same
/// crossing re-emits on every tick while the mismatch persists, there is no
/// queue and no deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub kind: NotificationKind,

    /// Hour label at which the new classification takes effect (`"HH:00"`).
    #[serde(rename = "effectiveTime")]
    pub effective_time: String,

    /// Price in effect from `effective_time` on.
    pub price: f32,
}

impl NotificationEvent {
    /// Build the advisory for the upcoming hour's price point.
    pub fn for_next_hour(kind: NotificationKind, next: &PricePoint) -> Self {
        Self {
            kind,
            effective_time: next.time.clone(),
            price: next.price,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NotificationKind::Rising => "High Price Period Approaching",
            NotificationKind::Falling => "Low Price Period Approaching",
        }
    }

    pub fn message(&self) -> String {
        let direction = match self.kind {
            NotificationKind::Rising => "increase",
            NotificationKind::Falling => "decrease",
        };
        format!(
            "Electricity prices will {direction} to ₹{:.2}/kWh at {}",
            self.price, self.effective_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_event_copies_the_next_point() {
        let next = PricePoint::new(8, 10.5);
        let event = NotificationEvent::for_next_hour(NotificationKind::Rising, &next);
        assert_eq!(event.effective_time, "08:00");
        assert_eq!(event.title(), "High Price Period Approaching");
        assert_eq!(
            event.message(),
            "Electricity prices will increase to ₹10.50/kWh at 08:00"
        );
    }

    #[test]
    fn falling_event_message() {
        let next = PricePoint::new(0, 5.0);
        let event = NotificationEvent::for_next_hour(NotificationKind::Falling, &next);
        assert_eq!(event.title(), "Low Price Period Approaching");
        assert_eq!(
            event.message(),
            "Electricity prices will decrease to ₹5.00/kWh at 00:00"
        );
    }
}
