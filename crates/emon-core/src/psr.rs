//! ENTSO-E production source (PSR) types and their display attributes.
//!
//! Generation documents tag every record with a PSR code such as `B16`.
//! [`SourceCategory::from_code`] maps a code to its display category; codes
//! outside the table are kept verbatim so rendering never fails on new
//! upstream codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label colour used for categories without an assigned colour.
pub const DEFAULT_COLOR: &str = "#00ff00";

/// Known ENTSO-E production source types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PsrType {
    Biomass,
    Lignite,
    CoalDerivedGas,
    FossilGas,
    HardCoal,
    FossilOil,
    Peat,
    OilShale,
    Geothermal,
    HydroPumpedStorage,
    HydroRunOfRiver,
    HydroWaterReservoir,
    Marine,
    Nuclear,
    OtherRenewable,
    Solar,
    Waste,
    WindOffshore,
    WindOnshore,
    Other,
    BatteryStorage,
    CompressedAirStorage,
    PowerToGas,
}

impl PsrType {
    /// Every known type, in code order.
    pub const ALL: [PsrType; 23] = [
        PsrType::Biomass,
        PsrType::Lignite,
        PsrType::CoalDerivedGas,
        PsrType::FossilGas,
        PsrType::HardCoal,
        PsrType::FossilOil,
        PsrType::Peat,
        PsrType::OilShale,
        PsrType::Geothermal,
        PsrType::HydroPumpedStorage,
        PsrType::HydroRunOfRiver,
        PsrType::HydroWaterReservoir,
        PsrType::Marine,
        PsrType::Nuclear,
        PsrType::OtherRenewable,
        PsrType::Solar,
        PsrType::Waste,
        PsrType::WindOffshore,
        PsrType::WindOnshore,
        PsrType::Other,
        PsrType::BatteryStorage,
        PsrType::CompressedAirStorage,
        PsrType::PowerToGas,
    ];

    /// Look up a type by its ENTSO-E code (exact match, e.g. `"B19"`).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            PsrType::Biomass => "B01",
            PsrType::Lignite => "B02",
            PsrType::CoalDerivedGas => "B03",
            PsrType::FossilGas => "B04",
            PsrType::HardCoal => "B05",
            PsrType::FossilOil => "B06",
            PsrType::Peat => "B07",
            PsrType::OilShale => "B08",
            PsrType::Geothermal => "B09",
            PsrType::HydroPumpedStorage => "B10",
            PsrType::HydroRunOfRiver => "B11",
            PsrType::HydroWaterReservoir => "B12",
            PsrType::Marine => "B13",
            PsrType::Nuclear => "B14",
            PsrType::OtherRenewable => "B15",
            PsrType::Solar => "B16",
            PsrType::Waste => "B17",
            PsrType::WindOffshore => "B18",
            PsrType::WindOnshore => "B19",
            PsrType::Other => "B20",
            PsrType::BatteryStorage => "B25",
            PsrType::CompressedAirStorage => "B26",
            PsrType::PowerToGas => "B27",
        }
    }

    /// Human-readable category name.
    pub fn label(self) -> &'static str {
        match self {
            PsrType::Biomass => "Biomass",
            PsrType::Lignite => "Lignite",
            PsrType::CoalDerivedGas => "Coal-derived Gas",
            PsrType::FossilGas => "Fossil Gas",
            PsrType::HardCoal => "Hard Coal",
            PsrType::FossilOil => "Fossil Oil",
            PsrType::Peat => "Peat",
            PsrType::OilShale => "Oil Shale",
            PsrType::Geothermal => "Geothermal",
            PsrType::HydroPumpedStorage => "Hydro Pumped Storage",
            PsrType::HydroRunOfRiver => "Hydro Run-of-river",
            PsrType::HydroWaterReservoir => "Hydro Water Reservoir",
            PsrType::Marine => "Marine (wave, tidal)",
            PsrType::Nuclear => "Nuclear",
            PsrType::OtherRenewable => "Other Renewable",
            PsrType::Solar => "Solar",
            PsrType::Waste => "Waste",
            PsrType::WindOffshore => "Wind Offshore",
            PsrType::WindOnshore => "Wind Onshore",
            PsrType::Other => "Other",
            PsrType::BatteryStorage => "Battery storage",
            PsrType::CompressedAirStorage => "Compressed air energy storage",
            PsrType::PowerToGas => "Power-to-Gas",
        }
    }

    /// Assigned label colour, if the category has one.
    pub fn color(self) -> Option<&'static str> {
        match self {
            PsrType::Nuclear => Some("#9966FF"),
            PsrType::Solar => Some("#FFCE56"),
            PsrType::FossilGas => Some("#FDB45C"),
            PsrType::HydroWaterReservoir => Some("#36A2EB"),
            PsrType::HydroRunOfRiver => Some("#4BC0C0"),
            PsrType::WindOnshore => Some("#A4D9A0"),
            PsrType::Biomass => Some("#46BFBD"),
            // Upstream keyed this colour as "Fossil Hard coal", which no label
            // matches, so hard coal fell back to the default green there.
            PsrType::HardCoal => Some("#949FB1"),
            _ => None,
        }
    }
}

impl fmt::Display for PsrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display category of a generation record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    Known(PsrType),
    /// Code missing from the PSR table; rendered under the raw code.
    Unmapped(String),
}

impl SourceCategory {
    pub fn from_code(code: &str) -> Self {
        match PsrType::from_code(code) {
            Some(psr) => SourceCategory::Known(psr),
            None => SourceCategory::Unmapped(code.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SourceCategory::Known(psr) => psr.label(),
            SourceCategory::Unmapped(code) => code,
        }
    }

    /// Label colour, falling back to [`DEFAULT_COLOR`].
    pub fn color(&self) -> &'static str {
        match self {
            SourceCategory::Known(psr) => psr.color().unwrap_or(DEFAULT_COLOR),
            SourceCategory::Unmapped(_) => DEFAULT_COLOR,
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
