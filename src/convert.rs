use lazy_static::lazy_static;

/// A unit and its factor relative to the base unit of its category
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    pub id: &'static str,
    pub name: &'static str,
    pub factor: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnitCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub units: Vec<Unit>,
}

const fn unit(id: &'static str, name: &'static str, factor: f64) -> Unit {
    Unit { id, name, factor }
}

lazy_static! {
    pub static ref CATEGORIES: Vec<UnitCategory> = vec![
        UnitCategory {
            id: "length",
            name: "Length",
            units: vec![
                unit("m", "Meter", 1.0),
                unit("km", "Kilometer", 1000.0),
                unit("cm", "Centimeter", 0.01),
                unit("mm", "Millimeter", 0.001),
                unit("mi", "Mile", 1609.344),
                unit("ft", "Foot", 0.3048),
                unit("in", "Inch", 0.0254),
                unit("yd", "Yard", 0.9144),
            ],
        },
        UnitCategory {
            id: "mass",
            name: "Mass",
            units: vec![
                unit("kg", "Kilogram", 1.0),
                unit("g", "Gram", 0.001),
                unit("mg", "Milligram", 0.000001),
                unit("lb", "Pound", 0.453592),
                unit("oz", "Ounce", 0.0283495),
                unit("t", "Tonne", 1000.0),
            ],
        },
        // temperature factors are placeholders; conversion is affine and
        // goes through convert_temperature
        UnitCategory {
            id: "temperature",
            name: "Temperature",
            units: vec![
                unit("c", "Celsius", 1.0),
                unit("f", "Fahrenheit", 1.0),
                unit("k", "Kelvin", 1.0),
            ],
        },
        UnitCategory {
            id: "volume",
            name: "Volume",
            units: vec![
                unit("l", "Liter", 1.0),
                unit("ml", "Milliliter", 0.001),
                unit("m3", "Cubic meter", 1000.0),
                unit("gal", "Gallon (US)", 3.78541),
                unit("qt", "Quart", 0.946353),
                unit("pt", "Pint", 0.473176),
                unit("cup", "Cup", 0.236588),
            ],
        },
        UnitCategory {
            id: "area",
            name: "Area",
            units: vec![
                unit("m2", "Square meter", 1.0),
                unit("km2", "Square kilometer", 1_000_000.0),
                unit("ha", "Hectare", 10_000.0),
                unit("ac", "Acre", 4046.86),
                unit("ft2", "Square foot", 0.092903),
            ],
        },
        UnitCategory {
            id: "data",
            name: "Digital storage",
            units: vec![
                unit("b", "Byte", 1.0),
                unit("kb", "Kilobyte", 1024.0),
                unit("mb", "Megabyte", 1_048_576.0),
                unit("gb", "Gigabyte", 1_073_741_824.0),
                unit("tb", "Terabyte", 1_099_511_627_776.0),
            ],
        },
    ];
}

pub fn category(id: &str) -> Option<&'static UnitCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

fn find_unit(cat: &UnitCategory, id: &str) -> Option<Unit> {
    cat.units.iter().find(|u| u.id == id).copied()
}

// all temperature scales route through Celsius
fn convert_temperature(value: f64, from: &str, to: &str) -> Option<f64> {
    let celsius = match from {
        "c" => value,
        "f" => (value - 32.0) * 5.0 / 9.0,
        "k" => value - 273.15,
        _ => return None,
    };
    match to {
        "c" => Some(celsius),
        "f" => Some(celsius * 9.0 / 5.0 + 32.0),
        "k" => Some(celsius + 273.15),
        _ => None,
    }
}

/// Converts `value` between two units of the same category by going
/// through the category's base unit. Unknown category or unit ids yield
/// `None`.
pub fn convert(category_id: &str, from: &str, to: &str, value: f64) -> Option<f64> {
    let cat = category(category_id)?;
    if category_id == "temperature" {
        return convert_temperature(value, from, to);
    }

    let from_unit = find_unit(cat, from)?;
    let to_unit = find_unit(cat, to)?;
    Some(value * from_unit.factor / to_unit.factor)
}

/// How many target units one source unit is worth
pub fn conversion_rate(category_id: &str, from: &str, to: &str) -> Option<f64> {
    convert(category_id, from, to, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_length() {
        assert!(close(convert("length", "m", "km", 1000.0).unwrap(), 1.0));
        assert!(close(convert("length", "mi", "km", 1.0).unwrap(), 1.609344));
        assert!(close(convert("length", "in", "cm", 1.0).unwrap(), 2.54));
    }

    #[test]
    fn test_mass_and_data() {
        assert!(close(convert("mass", "kg", "g", 2.5).unwrap(), 2500.0));
        assert!(close(convert("data", "gb", "mb", 1.0).unwrap(), 1024.0));
    }

    #[test]
    fn test_temperature_fixed_points() {
        assert!(close(convert("temperature", "c", "f", 0.0).unwrap(), 32.0));
        assert!(close(convert("temperature", "c", "k", 0.0).unwrap(), 273.15));
        assert!(close(convert("temperature", "f", "c", 212.0).unwrap(), 100.0));
        assert!(close(convert("temperature", "k", "c", 273.15).unwrap(), 0.0));
        assert!(close(convert("temperature", "c", "c", -40.0).unwrap(), -40.0));
        assert!(close(convert("temperature", "f", "k", 32.0).unwrap(), 273.15));
    }

    #[test]
    fn test_roundtrip() {
        for (cat, from, to) in [("length", "ft", "m"), ("volume", "gal", "l"), ("area", "ac", "ha")] {
            let v = convert(cat, from, to, 123.456).unwrap();
            let back = convert(cat, to, from, v).unwrap();
            assert!(close(back, 123.456));
        }
    }

    #[test]
    fn test_unknown_ids() {
        assert_eq!(convert("length", "m", "parsec", 1.0), None);
        assert_eq!(convert("nope", "m", "km", 1.0), None);
        assert_eq!(convert("temperature", "c", "r", 1.0), None);
    }

    #[test]
    fn test_conversion_rate() {
        assert!(close(conversion_rate("length", "km", "m").unwrap(), 1000.0));
    }
}
