//! One-shot fill animation for skill bars.
//!
//! Each bar carries its target width inline. The first time a bar is at
//! least `visibility_threshold` visible it collapses to zero and, after
//! `fill_delay_ms`, gets its target width back so the stylesheet transition
//! plays the fill. Later visibility changes are ignored.

#[cfg(test)]
#[path = "skills_test.rs"]
mod skills_test;

use crate::config::SkillsConfig;
use crate::consts::SKILL_COLLAPSED_WIDTH;
use crate::timer::{Scheduler, Task};

/// Skill bar elements, indexed in document order.
pub trait SkillBarView {
    fn bar_count(&self) -> usize;

    /// The bar's current inline width (e.g. `"80%"`).
    fn width(&self, index: usize) -> String;

    fn set_width(&mut self, index: usize, width: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BarState {
    Waiting,
    Filling { target: String },
    Revealed,
}

pub struct SkillBars<V> {
    view: V,
    bars: Vec<BarState>,
    config: SkillsConfig,
}

impl<V: SkillBarView> SkillBars<V> {
    #[must_use]
    pub fn new(view: V, config: SkillsConfig) -> Self {
        let bars = vec![BarState::Waiting; view.bar_count()];
        Self { view, bars, config }
    }

    /// Report a visibility change for bar `index`.
    ///
    /// Returns `true` when this call started the bar's animation, after which
    /// the host can stop observing the element.
    pub fn on_visibility(&mut self, index: usize, ratio: f64, sched: &mut dyn Scheduler) -> bool {
        if ratio < self.config.visibility_threshold || ratio <= 0.0 {
            return false;
        }
        let Some(state) = self.bars.get_mut(index) else {
            log::warn!("skills: visibility reported for unknown bar {index}");
            return false;
        };
        if *state != BarState::Waiting {
            return false;
        }

        let target = self.view.width(index);
        self.view.set_width(index, SKILL_COLLAPSED_WIDTH);
        sched.set_timeout(self.config.fill_delay_ms, Task::RestoreSkillBar(index));
        log::debug!("skills: bar {index} filling to {target}");
        *state = BarState::Filling { target };
        true
    }

    /// Put bar `index` back at its target width.
    pub fn restore(&mut self, index: usize) {
        let Some(state) = self.bars.get_mut(index) else {
            return;
        };
        if !matches!(state, BarState::Filling { .. }) {
            return;
        }
        if let BarState::Filling { target } = std::mem::replace(state, BarState::Revealed) {
            self.view.set_width(index, &target);
        }
    }

    #[must_use]
    pub fn is_triggered(&self, index: usize) -> bool {
        self.bars.get(index).is_some_and(|s| *s != BarState::Waiting)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }
}
