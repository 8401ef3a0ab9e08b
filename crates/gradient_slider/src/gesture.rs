use gpui::{Pixels, Point};
use smallvec::{SmallVec, smallvec};

use crate::{
    layout::{SliderLayout, ThumbTravel},
    value::ValueModel,
};

/// Notifications delivered to both the action handler and event subscribers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientSliderEvent {
    /// A pointer-down landed on the thumb.
    TrackBegan { value: f32 },
    /// The value changed because of a drag.
    Change { value: f32, is_final: bool },
    /// The pointer was released after a successful begin.
    TrackEnded { value: f32 },
}

impl GradientSliderEvent {
    pub fn value(&self) -> f32 {
        match *self {
            Self::TrackBegan { value }
            | Self::Change { value, .. }
            | Self::TrackEnded { value } => value,
        }
    }

    pub fn is_final(&self) -> bool {
        match *self {
            Self::TrackBegan { .. } => false,
            Self::Change { is_final, .. } => is_final,
            Self::TrackEnded { .. } => true,
        }
    }
}

pub type GestureEvents = SmallVec<[GradientSliderEvent; 2]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Tracking,
}

/// Drives the `Idle -> Tracking -> Idle` pointer state machine.
///
/// If the host never delivers a pointer-up the tracker simply stays in
/// [`GestureState::Tracking`]; the next pointer-down starts over.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    state: GestureState,
}

impl GestureTracker {
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == GestureState::Tracking
    }

    /// Pointer-down, `position` is relative to the view.
    pub fn begin(
        &mut self,
        position: Point<Pixels>,
        layout: &SliderLayout,
        value: &ValueModel,
    ) -> Option<GradientSliderEvent> {
        if !layout.hit_test(position) {
            tracing::trace!("pointer down at {:?} missed the thumb", position);
            self.state = GestureState::Idle;
            return None;
        }

        tracing::trace!("tracking began at value {}", value.value());
        self.state = GestureState::Tracking;
        Some(GradientSliderEvent::TrackBegan {
            value: value.value(),
        })
    }

    /// Pointer-move. Only the x-coordinate is used.
    pub fn drag(
        &mut self,
        x: f32,
        travel: ThumbTravel,
        value: &mut ValueModel,
        continuous: bool,
    ) -> Option<GradientSliderEvent> {
        if !self.is_tracking() {
            return None;
        }

        let new_value = value.set_value(value.value_at_percent(travel.percent_for_position(x)));
        tracing::trace!("drag to x={} value={}", x, new_value);

        continuous.then_some(GradientSliderEvent::Change {
            value: new_value,
            is_final: false,
        })
    }

    /// Pointer-up. Always reports a final change and the end of tracking
    /// when a gesture was in progress, regardless of continuity.
    pub fn end(
        &mut self,
        x: Option<f32>,
        travel: ThumbTravel,
        value: &mut ValueModel,
    ) -> GestureEvents {
        if !self.is_tracking() {
            return GestureEvents::new();
        }

        if let Some(x) = x {
            value.set_value(value.value_at_percent(travel.percent_for_position(x)));
        }
        self.state = GestureState::Idle;
        tracing::trace!("tracking ended at value {}", value.value());

        smallvec![
            GradientSliderEvent::Change {
                value: value.value(),
                is_final: true,
            },
            GradientSliderEvent::TrackEnded {
                value: value.value(),
            },
        ]
    }
}
