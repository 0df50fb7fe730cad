//! Exclusive cross-fade between the outgoing and incoming content.

use std::time::Duration;

use nebula_core::{Pose, Transition};

/// The single piece of content on screen and how it currently looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer<'a, T> {
    pub content: &'a T,
    pub pose: Pose,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase<T> {
    Idle,
    Exiting {
        outgoing: T,
        transition: Transition,
        elapsed: Duration,
    },
    Entering {
        transition: Transition,
        elapsed: Duration,
    },
}

/// Runs exit, then enter, for every change of the displayed content.
///
/// Only one item is ever on screen: the outgoing item finishes its exit before
/// the incoming item starts to enter, so two items are never opaque together.
#[derive(Debug, Clone, PartialEq)]
pub struct Presence<T> {
    current: T,
    phase: Phase<T>,
    enter: Transition,
    exit: Transition,
}

impl<T: Clone + PartialEq> Presence<T> {
    /// Show `content` immediately, without an enter animation.
    pub fn new(content: T) -> Self {
        Self::with_transitions(content, Transition::enter(), Transition::exit())
    }

    pub fn with_transitions(content: T, enter: Transition, exit: Transition) -> Self {
        Self {
            current: content,
            phase: Phase::Idle,
            enter,
            exit,
        }
    }

    /// Content that is, or will be, at rest once transitions finish.
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn is_transitioning(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Switch to `content`. Showing what is already at rest is a no-op.
    pub fn show(&mut self, content: T) {
        match &self.phase {
            Phase::Idle if content == self.current => return,
            Phase::Idle => {
                let outgoing = std::mem::replace(&mut self.current, content);
                self.phase = Phase::Exiting {
                    outgoing,
                    transition: self.exit,
                    elapsed: Duration::ZERO,
                };
                return;
            }
            // The incoming item has not appeared yet; just swap which one waits.
            Phase::Exiting { .. } => {}
            Phase::Entering {
                transition,
                elapsed,
            } => {
                // Exit from wherever the half-entered item is.
                let pose = transition.sample(*elapsed);
                let outgoing = self.current.clone();
                self.phase = Phase::Exiting {
                    outgoing,
                    transition: self.exit.starting_at(pose),
                    elapsed: Duration::ZERO,
                };
            }
        }
        self.current = content;
    }

    /// Advance the running transition by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let mut remaining = dt;
        loop {
            match &mut self.phase {
                Phase::Idle => return,
                Phase::Exiting {
                    transition,
                    elapsed,
                    ..
                } => {
                    *elapsed += remaining;
                    let Some(spill) = elapsed.checked_sub(transition.total()) else {
                        return;
                    };
                    remaining = spill;
                    self.phase = Phase::Entering {
                        transition: self.enter,
                        elapsed: Duration::ZERO,
                    };
                }
                Phase::Entering {
                    transition,
                    elapsed,
                } => {
                    *elapsed += remaining;
                    if transition.is_complete(*elapsed) {
                        self.phase = Phase::Idle;
                    }
                    return;
                }
            }
        }
    }

    /// What is on screen right now.
    pub fn layer(&self) -> Layer<'_, T> {
        match &self.phase {
            Phase::Idle => Layer {
                content: &self.current,
                pose: Pose::VISIBLE,
            },
            Phase::Exiting {
                outgoing,
                transition,
                elapsed,
            } => Layer {
                content: outgoing,
                pose: transition.sample(*elapsed),
            },
            Phase::Entering {
                transition,
                elapsed,
            } => Layer {
                content: &self.current,
                pose: transition.sample(*elapsed),
            },
        }
    }
}
