//! Experiment parameters for runtime tuning
//!
//! Each experiment declares a static table of [`ParamSpec`]s. The control
//! boundary writes into a [`ParameterStore`] whenever a slider moves; the
//! simulation takes one [`Params`] snapshot per tick so a tick never sees a
//! half-applied change.

use crate::ControlError;

/// Declaration of one named scalar parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParamSpec {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        unit: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self {
            key,
            label,
            unit,
            min,
            max,
            default,
        }
    }

    /// Clamp a raw value into range
    pub fn clamp(&self, raw: f64) -> f64 {
        raw.clamp(self.min, self.max)
    }
}

/// Immutable parameter values for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    specs: &'static [ParamSpec],
    values: Vec<f64>,
}

impl Params {
    fn defaults(specs: &'static [ParamSpec]) -> Self {
        Self {
            specs,
            values: specs.iter().map(|s| s.default).collect(),
        }
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.key == key)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.index_of(key).map(|i| self.values[i])
    }

    /// Value of a parameter the experiment itself declared.
    ///
    /// Asking for an undeclared key is a bug in the experiment; release
    /// builds fall back to 0.0, which every model treats as "no effect".
    pub fn value(&self, key: &str) -> f64 {
        let value = self.get(key);
        debug_assert!(value.is_some(), "undeclared parameter '{key}'");
        value.unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamSpec, f64)> + '_ {
        self.specs.iter().zip(self.values.iter().copied())
    }

    pub fn specs(&self) -> &'static [ParamSpec] {
        self.specs
    }
}

/// Current parameter values, clamped on write
#[derive(Debug, Clone)]
pub struct ParameterStore {
    experiment: &'static str,
    current: Params,
}

impl ParameterStore {
    pub fn new(experiment: &'static str, specs: &'static [ParamSpec]) -> Self {
        Self {
            experiment,
            current: Params::defaults(specs),
        }
    }

    /// Write a parameter and return the value actually stored.
    ///
    /// Out-of-range values are clamped and non-finite values are ignored
    /// (the previous value is kept). Only an unknown key is an error.
    pub fn set(&mut self, key: &str, raw: f64) -> Result<f64, ControlError> {
        let index = self
            .current
            .index_of(key)
            .ok_or_else(|| ControlError::UnknownParameter {
                key: key.to_string(),
                experiment: self.experiment,
            })?;

        if !raw.is_finite() {
            log::debug!("Ignoring non-finite value for '{}'", key);
            return Ok(self.current.values[index]);
        }

        let value = self.current.specs[index].clamp(raw);
        self.current.values[index] = value;
        Ok(value)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.current.get(key)
    }

    /// Copy of the current values for one tick
    pub fn snapshot(&self) -> Params {
        self.current.clone()
    }

    /// Restore every parameter to its default
    pub fn reset(&mut self) {
        self.current = Params::defaults(self.current.specs);
    }

    pub fn specs(&self) -> &'static [ParamSpec] {
        self.current.specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::new("voltage", "Voltage", "V", -5.0, 5.0, 0.0),
        ParamSpec::new("wavelength", "Wavelength", "nm", 100.0, 800.0, 400.0),
    ];

    #[test]
    fn test_defaults() {
        let store = ParameterStore::new("test", SPECS);
        assert_eq!(store.get("voltage"), Some(0.0));
        assert_eq!(store.get("wavelength"), Some(400.0));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_set_clamps() {
        let mut store = ParameterStore::new("test", SPECS);
        assert_eq!(store.set("voltage", 12.0).unwrap(), 5.0);
        assert_eq!(store.set("voltage", -12.0).unwrap(), -5.0);
        assert_eq!(store.set("wavelength", 532.0).unwrap(), 532.0);
        assert_eq!(store.get("wavelength"), Some(532.0));
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut store = ParameterStore::new("test", SPECS);
        for raw in [-100.0, -5.0, -0.3, 0.0, 2.5, 5.0, 1e9] {
            let first = store.set("voltage", raw).unwrap();
            let second = store.set("voltage", raw).unwrap();
            assert_eq!(first, second);
            assert!((-5.0..=5.0).contains(&first));
        }
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let mut store = ParameterStore::new("test", SPECS);
        store.set("voltage", 1.5).unwrap();
        assert_eq!(store.set("voltage", f64::NAN).unwrap(), 1.5);
        assert_eq!(store.set("voltage", f64::INFINITY).unwrap(), 1.5);
        assert_eq!(store.get("voltage"), Some(1.5));
    }

    #[test]
    fn test_unknown_key() {
        let mut store = ParameterStore::new("test", SPECS);
        let err = store.set("frequency", 1.0).unwrap_err();
        assert_eq!(
            err,
            ControlError::UnknownParameter {
                key: "frequency".to_string(),
                experiment: "test",
            }
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = ParameterStore::new("test", SPECS);
        let before = store.snapshot();
        store.set("voltage", 3.0).unwrap();
        assert_eq!(before.value("voltage"), 0.0);
        assert_eq!(store.snapshot().value("voltage"), 3.0);

        store.reset();
        assert_eq!(store.snapshot(), before);
    }
}
