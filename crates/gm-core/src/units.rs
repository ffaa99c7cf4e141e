// gm-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Ratio as UomRatio,
    SpecificHeatCapacity as UomSpecificHeatCapacity,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Ratio = UomRatio;
pub type SpecHeat = UomSpecificHeatCapacity;

/// Joules in one thermochemical calorie.
pub const JOULES_PER_CALORIE: f64 = 4.184;

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[inline]
pub fn percent(v: f64) -> Ratio {
    use uom::si::ratio::percent;
    Ratio::new::<percent>(v)
}

#[inline]
pub fn ppm(v: f64) -> Ratio {
    use uom::si::ratio::part_per_million;
    Ratio::new::<part_per_million>(v)
}

#[inline]
pub fn ppb(v: f64) -> Ratio {
    use uom::si::ratio::part_per_billion;
    Ratio::new::<part_per_billion>(v)
}

#[inline]
pub fn ppt(v: f64) -> Ratio {
    use uom::si::ratio::part_per_trillion;
    Ratio::new::<part_per_trillion>(v)
}

/// Density in g/L (numerically identical to kg/m³).
#[inline]
pub fn g_per_l(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Specific heat in cal/(g·K), the unit of the MKS reference tables.
#[inline]
pub fn cal_per_g_k(v: f64) -> SpecHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecHeat::new::<joule_per_kilogram_kelvin>(v * JOULES_PER_CALORIE * 1e3)
}

/// Plain fraction of a ratio (1.0 == 100 %).
#[inline]
pub fn fraction_of(r: Ratio) -> f64 {
    use uom::si::ratio::ratio;
    r.get::<ratio>()
}

#[inline]
pub fn g_per_l_of(d: Density) -> f64 {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    d.get::<kilogram_per_cubic_meter>()
}

#[inline]
pub fn cal_per_g_k_of(c: SpecHeat) -> f64 {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    c.get::<joule_per_kilogram_kelvin>() / (JOULES_PER_CALORIE * 1e3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _r = unitless(0.5);
        let _p = percent(1.0);
        let _d = g_per_l(1.293);
        let _c = cal_per_g_k(0.24);
    }

    #[test]
    fn ratio_prefixes_agree() {
        assert!((fraction_of(percent(1.0)) - 0.01).abs() < 1e-15);
        assert!((fraction_of(ppm(50.0)) - 50e-6).abs() < 1e-18);
        assert!((fraction_of(ppb(12.0)) - 12e-9).abs() < 1e-21);
        assert!((fraction_of(ppt(3.0)) - 3e-12).abs() < 1e-24);
    }

    #[test]
    fn catalog_units_round_trip() {
        assert!((g_per_l_of(g_per_l(1.25)) - 1.25).abs() < 1e-12);
        assert!((cal_per_g_k_of(cal_per_g_k(0.2485)) - 0.2485).abs() < 1e-12);
    }
}
