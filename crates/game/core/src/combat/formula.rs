//! Auditable formula breakdowns attached to combat events.

use std::borrow::Cow;

/// One named term of a formula.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaComponent {
    pub name: Cow<'static, str>,
    pub value: f64,
}

/// Human-readable calculation, its component values and the final result.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormulaBreakdown {
    pub calculation: String,
    pub components: Vec<FormulaComponent>,
    pub result: f64,
}

impl FormulaBreakdown {
    pub fn new(calculation: impl Into<String>, result: f64) -> Self {
        Self {
            calculation: calculation.into(),
            components: Vec::new(),
            result,
        }
    }

    /// Append a component (builder pattern).
    #[must_use]
    pub fn with(mut self, name: &'static str, value: f64) -> Self {
        self.components.push(FormulaComponent {
            name: Cow::Borrowed(name),
            value,
        });
        self
    }

    /// Value of the first component called `name`.
    pub fn component(&self, name: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }

    /// Join several stage breakdowns into one, labelled `Stage: calculation`.
    pub fn merge<'a>(
        stages: impl IntoIterator<Item = (&'static str, &'a FormulaBreakdown)>,
        result: f64,
    ) -> Self {
        let mut merged = Self::new(String::new(), result);
        for (label, stage) in stages {
            if !merged.calculation.is_empty() {
                merged.calculation.push_str(" | ");
            }
            merged.calculation.push_str(label);
            merged.calculation.push_str(": ");
            merged.calculation.push_str(&stage.calculation);
            merged.components.extend(stage.components.iter().cloned());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_concatenates_stages() {
        let hit = FormulaBreakdown::new("70 base", 70.0).with("base", 70.0);
        let damage = FormulaBreakdown::new("20 weapon", 20.0).with("weapon_base", 20.0);

        let merged = FormulaBreakdown::merge([("Hit", &hit), ("Damage", &damage)], 20.0);

        assert_eq!(merged.calculation, "Hit: 70 base | Damage: 20 weapon");
        assert_eq!(merged.components.len(), 2);
        assert_eq!(merged.component("weapon_base"), Some(20.0));
        assert_eq!(merged.result, 20.0);
    }
}
