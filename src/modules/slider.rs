//! Discrete range slider
//!
//! A drag produces arbitrary raw values; the visible value only ever takes
//! one of the governance-allowed values. Small drags around the current value
//! are absorbed, larger ones move one step towards the drag.

use tracing::trace;

use crate::domain::Amount;
use crate::modules::toolkit::units::format_crypto_unit_value;

/// Contract whose ranges are percentages rather than coin amounts
pub const PERCENT_CONTRACT: &str = "Block Reward";

/// Predecessor and successor of `current` in `allowed`.
///
/// At either end the boundary value stands in for the missing neighbour.
/// `None` when `current` is not an allowed value.
pub fn neighbors<'a>(allowed: &'a [Amount], current: &Amount) -> Option<(&'a Amount, &'a Amount)> {
    let idx = allowed.iter().position(|value| value == current)?;
    let left = &allowed[idx.saturating_sub(1)];
    let right = allowed.get(idx + 1).unwrap_or(&allowed[idx]);
    Some((left, right))
}

/// Visible value after a drag to `raw`.
///
/// `allowed` is sorted ascending. A raw value strictly between the
/// neighbours of `current` keeps `current`; otherwise the value moves to the
/// left neighbour when `raw <= left`, else to the right one. If `current` is
/// not allowed, `raw` snaps to the nearest allowed value (lower on ties).
pub fn on_drag(raw: &Amount, allowed: &[Amount], current: &Amount) -> Amount {
    let Some((left, right)) = neighbors(allowed, current) else {
        return nearest(raw, allowed).unwrap_or(*current);
    };

    let next = if raw > left && raw < right {
        *current
    } else if raw <= left {
        *left
    } else {
        *right
    };
    trace!("drag {} around {} ({}..{}) -> {}", raw, current, left, right, next);
    next
}

fn nearest(raw: &Amount, allowed: &[Amount]) -> Option<Amount> {
    let distance = |value: &Amount| match value.checked_sub(raw) {
        Some(above) => above,
        None => raw.checked_sub(value).unwrap_or_default(),
    };
    // min_by_key keeps the first minimum, which is the lower value
    allowed.iter().min_by_key(|value| distance(value)).copied()
}

/// Left offset (percent) of a label centred on the thumb at `percentage`.
///
/// Clamped to `[0, 100 - label width %]` so the label stays inside its
/// container. A container without width yields 0.
pub fn label_left_percent(percentage: f64, label_width: f64, container_width: f64) -> f64 {
    if container_width <= 0.0 {
        return 0.0;
    }
    let width_percent = label_width / container_width * 100.0;
    let left = percentage - width_percent / 2.0;
    if left < 0.0 {
        return 0.0;
    }
    let upper = 100.0 - width_percent;
    if left > upper {
        return upper;
    }
    left
}

/// Slider over an allowed range for one governable parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSlider {
    contract_name: String,
    range: Vec<Amount>,
    starting: Amount,
    value: Amount,
}

impl StepSlider {
    /// Slider starting at the on-chain `value`; the range is sorted and deduplicated
    pub fn new(contract_name: impl Into<String>, range: Vec<Amount>, value: Amount) -> Self {
        let mut slider = Self {
            contract_name: contract_name.into(),
            range: Vec::new(),
            starting: value,
            value,
        };
        slider.set_range(range);
        slider
    }

    /// Replace the allowed range; the visible value becomes the new start
    pub fn set_range(&mut self, mut range: Vec<Amount>) {
        range.sort();
        range.dedup();
        if range.is_empty() {
            range.push(Amount::ZERO);
        }
        self.range = range;
        self.starting = self.value;
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn range(&self) -> &[Amount] {
        &self.range
    }

    pub fn starting(&self) -> &Amount {
        &self.starting
    }

    pub fn value(&self) -> &Amount {
        &self.value
    }

    pub fn min(&self) -> &Amount {
        &self.range[0]
    }

    pub fn max(&self) -> &Amount {
        &self.range[self.range.len() - 1]
    }

    /// Apply a drag relative to the starting value and return the visible value
    pub fn drag(&mut self, raw: &Amount) -> &Amount {
        self.value = on_drag(raw, &self.range, &self.starting);
        &self.value
    }

    pub fn is_changed(&self) -> bool {
        self.value != self.starting
    }

    /// Position of the visible value, two decimals, e.g. `"33.33"`
    pub fn percentage(&self) -> String {
        let bp = self.value.basis_points_within(self.min(), self.max());
        format!("{}.{:02}", bp / 100, bp % 100)
    }

    /// Label offset for a label of `label_width` inside `container_width`
    pub fn label_left(&self, label_width: f64, container_width: f64) -> f64 {
        let bp = self.value.basis_points_within(self.min(), self.max());
        label_left_percent(bp as f64 / 100.0, label_width, container_width)
    }

    pub fn label_prefix(&self) -> &'static str {
        if self.is_changed() {
            "Change to"
        } else {
            "Current"
        }
    }

    /// Value as shown to the user: percent for block reward, unit otherwise
    pub fn format_value(&self, value: &Amount) -> String {
        if self.contract_name == PERCENT_CONTRACT {
            format!("{} %", value)
        } else {
            format_crypto_unit_value(value)
        }
    }

    /// `Current: 1 DMD`, `Change to: 2 DMD`
    pub fn label_text(&self) -> String {
        format!("{}: {}", self.label_prefix(), self.format_value(&self.value))
    }

    pub fn min_label(&self) -> String {
        format!("Min. {}", self.format_value(self.min()))
    }

    pub fn max_label(&self) -> String {
        format!("Max. {}", self.format_value(self.max()))
    }
}
