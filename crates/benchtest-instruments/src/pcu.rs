//! Register access on a power-control unit.
//!
//! The vendor driver is reached through [`PcuDriver`] and its
//! [`DatamodelProvider`] half; registers are located
//! by dotted data-model paths such as `"control.vout.setpoint"`, where the
//! first segment names a top-level data-model item.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InstrumentError, InstrumentResult};

/// Value held by a data-model register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegisterValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer register.
    Integer(i64),
    /// Floating-point register.
    Float(f64),
    /// Text register.
    Text(String),
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for RegisterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for RegisterValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for RegisterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for RegisterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RegisterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Accessor for a single register returned by [`RegisterMap::search`].
pub trait Register {
    /// Reads the register.
    fn get_value(&self) -> InstrumentResult<RegisterValue>;

    /// Writes the register.
    fn set_value(&mut self, value: RegisterValue) -> InstrumentResult<()>;
}

/// A searchable set of registers (live registers or a data-model image).
pub trait RegisterMap {
    /// Resolves a dotted path to a register accessor.
    ///
    /// Implementations return [`InstrumentError::UnknownTopLevel`] when the
    /// first segment is unknown and [`InstrumentError::UnknownItem`] when the
    /// rest of the path does not resolve.
    fn search(&mut self, path: &str) -> InstrumentResult<Box<dyn Register + '_>>;
}

/// Data-model side of the vendor driver.
pub trait DatamodelProvider {
    /// Returns true if `name` is a top-level data-model item.
    fn top_level(&self, name: &str) -> bool;

    /// Register map of the image region at `area`/`bank` for top-level item
    /// `name`.
    fn dmir(
        &mut self,
        name: &str,
        area: u32,
        bank: u32,
    ) -> InstrumentResult<Box<dyn RegisterMap + '_>>;
}

/// Vendor PCU driver handle.
pub trait PcuDriver: DatamodelProvider {
    /// Live register map of the running unit.
    fn live_regs(&mut self) -> &mut dyn RegisterMap;
}

/// Area and bank selecting a data-model image region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmirRegion {
    /// Memory area.
    #[serde(default)]
    pub area: u32,
    /// Bank within the area.
    #[serde(default = "default_bank")]
    pub bank: u32,
}

fn default_bank() -> u32 {
    20
}

impl Default for DmirRegion {
    fn default() -> Self {
        Self {
            area: 0,
            bank: default_bank(),
        }
    }
}

/// Convenience layer over a [`PcuDriver`].
///
/// Every access is logged; unknown paths are logged and returned as errors.
#[derive(Debug)]
pub struct Pcu<D> {
    driver: D,
    region: DmirRegion,
}

impl<D: PcuDriver> Pcu<D> {
    /// Wraps a driver, using the default region (area 0, bank 20).
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            region: DmirRegion::default(),
        }
    }

    /// Sets the region used by [`Pcu::write_dmir`] and [`Pcu::read_dmir`].
    #[must_use]
    pub fn with_region(mut self, region: DmirRegion) -> Self {
        self.region = region;
        self
    }

    /// Default data-model image region.
    pub fn region(&self) -> DmirRegion {
        self.region
    }

    /// Borrows the wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrows the wrapped driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Writes a live register.
    pub fn write_live_regs(
        &mut self,
        item: &str,
        value: impl Into<RegisterValue>,
    ) -> InstrumentResult<()> {
        let value = value.into();
        tracing::info!(item, %value, "Writing live register");

        let result = set_in(self.driver.live_regs(), item, value);
        log_failure(item, result)
    }

    /// Reads a live register.
    pub fn read_live_regs(&mut self, item: &str) -> InstrumentResult<RegisterValue> {
        let result = get_in(self.driver.live_regs(), item);
        let value = log_failure(item, result)?;
        tracing::info!(item, %value, "Read live register");
        Ok(value)
    }

    /// Writes a register in the default data-model image region.
    pub fn write_dmir(
        &mut self,
        item: &str,
        value: impl Into<RegisterValue>,
    ) -> InstrumentResult<()> {
        let region = self.region;
        self.write_dmir_in(item, value, region)
    }

    /// Reads a register from the default data-model image region.
    pub fn read_dmir(&mut self, item: &str) -> InstrumentResult<RegisterValue> {
        let region = self.region;
        self.read_dmir_in(item, region)
    }

    /// Writes a register in the given data-model image region.
    pub fn write_dmir_in(
        &mut self,
        item: &str,
        value: impl Into<RegisterValue>,
        region: DmirRegion,
    ) -> InstrumentResult<()> {
        let value = value.into();
        tracing::info!(item, %value, area = region.area, bank = region.bank, "Writing DMIR");

        let result = self
            .image(item, region)
            .and_then(|mut map| set_in(map.as_mut(), item, value));
        log_failure(item, result)
    }

    /// Reads a register from the given data-model image region.
    pub fn read_dmir_in(&mut self, item: &str, region: DmirRegion) -> InstrumentResult<RegisterValue> {
        tracing::debug!(item, area = region.area, bank = region.bank, "Reading DMIR");

        let result = self
            .image(item, region)
            .and_then(|mut map| get_in(map.as_mut(), item));
        let value = log_failure(item, result)?;
        tracing::info!(item, %value, "Read DMIR");
        Ok(value)
    }

    fn image(
        &mut self,
        item: &str,
        region: DmirRegion,
    ) -> InstrumentResult<Box<dyn RegisterMap + '_>> {
        let top = top_level_name(item);
        if !self.driver.top_level(top) {
            return Err(InstrumentError::UnknownTopLevel {
                top: top.to_string(),
            });
        }
        self.driver.dmir(top, region.area, region.bank)
    }
}

/// First segment of a dotted data-model path.
pub fn top_level_name(item: &str) -> &str {
    item.split('.').next().unwrap_or(item)
}

fn set_in<M: RegisterMap + ?Sized>(
    map: &mut M,
    item: &str,
    value: RegisterValue,
) -> InstrumentResult<()> {
    let mut reg = map.search(item)?;
    reg.set_value(value)
}

fn get_in<M: RegisterMap + ?Sized>(map: &mut M, item: &str) -> InstrumentResult<RegisterValue> {
    let reg = map.search(item)?;
    reg.get_value()
}

fn log_failure<T>(item: &str, result: InstrumentResult<T>) -> InstrumentResult<T> {
    if let Err(err) = &result {
        match err {
            InstrumentError::UnknownTopLevel { top } => {
                tracing::warn!(item, top = %top, "Top level datamodel item does not exist");
            }
            InstrumentError::UnknownItem { .. } => {
                tracing::warn!(item, "Datamodel item does not exist");
            }
            other => tracing::warn!(item, error = %other, "Register access failed"),
        }
    }
    result
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::BTreeMap;

    use super::*;

    /// In-memory register file keyed by full path.
    #[derive(Debug, Default)]
    pub struct MemoryMap {
        pub registers: BTreeMap<String, RegisterValue>,
    }

    struct Slot<'a>(&'a mut RegisterValue);

    impl Register for Slot<'_> {
        fn get_value(&self) -> InstrumentResult<RegisterValue> {
            Ok(self.0.clone())
        }

        fn set_value(&mut self, value: RegisterValue) -> InstrumentResult<()> {
            *self.0 = value;
            Ok(())
        }
    }

    impl RegisterMap for MemoryMap {
        fn search(&mut self, path: &str) -> InstrumentResult<Box<dyn Register + '_>> {
            let top = top_level_name(path);
            if !self.registers.keys().any(|k| top_level_name(k) == top) {
                return Err(InstrumentError::UnknownTopLevel {
                    top: top.to_string(),
                });
            }
            self.registers
                .get_mut(path)
                .map(|v| Box::new(Slot(v)) as Box<dyn Register + '_>)
                .ok_or_else(|| InstrumentError::UnknownItem {
                    path: path.to_string(),
                })
        }
    }

    /// Driver with one live map and one image per region.
    #[derive(Debug, Default)]
    pub struct MockDriver {
        pub live: MemoryMap,
        pub images: BTreeMap<(u32, u32), MemoryMap>,
    }

    impl MockDriver {
        pub fn with_live(entries: &[(&str, RegisterValue)]) -> Self {
            let mut driver = Self::default();
            for (k, v) in entries {
                driver.live.registers.insert((*k).to_string(), v.clone());
            }
            driver
        }

        pub fn insert_image(&mut self, region: DmirRegion, path: &str, value: RegisterValue) {
            self.images
                .entry((region.area, region.bank))
                .or_default()
                .registers
                .insert(path.to_string(), value);
        }
    }

    impl DatamodelProvider for MockDriver {
        fn top_level(&self, name: &str) -> bool {
            self.images
                .values()
                .any(|m| m.registers.keys().any(|k| top_level_name(k) == name))
        }

        fn dmir(
            &mut self,
            _name: &str,
            area: u32,
            bank: u32,
        ) -> InstrumentResult<Box<dyn RegisterMap + '_>> {
            let map = self.images.entry((area, bank)).or_default();
            Ok(Box::new(ImageView(map)))
        }
    }

    impl PcuDriver for MockDriver {
        fn live_regs(&mut self) -> &mut dyn RegisterMap {
            &mut self.live
        }
    }

    struct ImageView<'a>(&'a mut MemoryMap);

    impl RegisterMap for ImageView<'_> {
        fn search(&mut self, path: &str) -> InstrumentResult<Box<dyn Register + '_>> {
            self.0
                .registers
                .get_mut(path)
                .map(|v| Box::new(Slot(v)) as Box<dyn Register + '_>)
                .ok_or_else(|| InstrumentError::UnknownItem {
                    path: path.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockDriver;
    use super::*;

    #[test]
    fn test_live_register_roundtrip() {
        let driver = MockDriver::with_live(&[("control.vout.setpoint", 0.0.into())]);
        let mut pcu = Pcu::new(driver);

        pcu.write_live_regs("control.vout.setpoint", 48.5).unwrap();
        assert_eq!(
            pcu.read_live_regs("control.vout.setpoint").unwrap(),
            RegisterValue::Float(48.5)
        );
    }

    #[test]
    fn test_live_register_unknown_paths() {
        let driver = MockDriver::with_live(&[("control.enable", false.into())]);
        let mut pcu = Pcu::new(driver);

        assert_eq!(
            pcu.read_live_regs("status.fault"),
            Err(InstrumentError::UnknownTopLevel {
                top: "status".to_string()
            })
        );
        assert_eq!(
            pcu.write_live_regs("control.missing", true),
            Err(InstrumentError::UnknownItem {
                path: "control.missing".to_string()
            })
        );
        // Failed writes leave existing registers untouched
        assert_eq!(
            pcu.read_live_regs("control.enable").unwrap(),
            RegisterValue::Bool(false)
        );
    }

    #[test]
    fn test_dmir_default_region() {
        let mut driver = MockDriver::default();
        driver.insert_image(DmirRegion::default(), "limits.iout_max", 10_i64.into());
        let mut pcu = Pcu::new(driver);

        assert_eq!(pcu.region(), DmirRegion { area: 0, bank: 20 });

        pcu.write_dmir("limits.iout_max", 12_i64).unwrap();
        assert_eq!(
            pcu.read_dmir("limits.iout_max").unwrap(),
            RegisterValue::Integer(12)
        );
    }

    #[test]
    fn test_dmir_explicit_region() {
        let other = DmirRegion { area: 1, bank: 3 };
        let mut driver = MockDriver::default();
        driver.insert_image(DmirRegion::default(), "limits.iout_max", 10_i64.into());
        driver.insert_image(other, "limits.iout_max", 7_i64.into());
        let mut pcu = Pcu::new(driver).with_region(other);

        assert_eq!(
            pcu.read_dmir("limits.iout_max").unwrap(),
            RegisterValue::Integer(7)
        );
        assert_eq!(
            pcu.read_dmir_in("limits.iout_max", DmirRegion::default())
                .unwrap(),
            RegisterValue::Integer(10)
        );
    }

    #[test]
    fn test_dmir_unknown_paths() {
        let mut driver = MockDriver::default();
        driver.insert_image(DmirRegion::default(), "limits.iout_max", 10_i64.into());
        let mut pcu = Pcu::new(driver);

        assert!(matches!(
            pcu.read_dmir("calibration.gain"),
            Err(InstrumentError::UnknownTopLevel { top }) if top == "calibration"
        ));
        assert!(matches!(
            pcu.write_dmir("limits.vout_max", 60.0),
            Err(InstrumentError::UnknownItem { path }) if path == "limits.vout_max"
        ));
    }

    #[test]
    fn test_top_level_name() {
        assert_eq!(top_level_name("control.vout.setpoint"), "control");
        assert_eq!(top_level_name("control"), "control");
    }

    #[test]
    fn test_unknown_top_level_skips_image_lookup() {
        let mut driver = MockDriver::default();
        driver.insert_image(DmirRegion::default(), "limits.iout_max", 10_i64.into());
        let mut pcu = Pcu::new(driver);

        let region = DmirRegion { area: 4, bank: 9 };
        assert!(pcu.read_dmir_in("calibration.gain", region).is_err());
        assert!(!pcu.driver().images.contains_key(&(4, 9)));
        assert!(pcu.driver().top_level("limits"));
    }

    #[test]
    fn test_register_value_display() {
        assert_eq!(RegisterValue::from("on").to_string(), "on");
        assert_eq!(RegisterValue::Integer(-3).to_string(), "-3");
        assert_eq!(RegisterValue::Bool(true).to_string(), "true");
    }
}
