use super::{ScaleAdapter, ScaleKey};

/// A continuous scale mapping a numeric domain linearly onto a pixel range.
///
/// Category keys are mapped by parsing them as numbers, so labels such as
/// `"2019"` work on a continuous year axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            // Degenerate domain: everything lands on the middle of the range.
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

impl ScaleAdapter for LinearScale {
    fn position_of(&self, key: &ScaleKey<'_>) -> Option<f64> {
        let value = match key {
            ScaleKey::Value(v) => *v,
            ScaleKey::Category(label) => label.trim().parse::<f64>().ok()?,
        };
        let position = self.scale(value);
        position.is_finite().then_some(position)
    }

    fn can_invert(&self) -> bool {
        true
    }

    fn invert(&self, pixel: f64) -> Option<f64> {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return Some(d0);
        }
        let value = d0 + (pixel - r0) / (r1 - r0) * (d1 - d0);
        value.is_finite().then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_invert() {
        let scale = LinearScale::new((0.0, 50.0), (0.0, 500.0));
        assert_eq!(scale.position_of(&ScaleKey::Value(25.0)), Some(250.0));
        assert_eq!(scale.invert(100.0), Some(10.0));
    }

    #[test]
    fn test_inverted_pixel_range() {
        // Typical y axis: larger values sit higher on screen.
        let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0));
        assert_eq!(scale.position_of(&ScaleKey::Value(100.0)), Some(0.0));
        assert_eq!(scale.position_of(&ScaleKey::Value(25.0)), Some(300.0));
        assert_eq!(scale.invert(400.0), Some(0.0));
    }

    #[test]
    fn test_category_keys_parse_as_numbers() {
        let scale = LinearScale::new((2000.0, 2010.0), (0.0, 100.0));
        assert_eq!(scale.position_of(&ScaleKey::Category("2005")), Some(50.0));
        assert_eq!(scale.position_of(&ScaleKey::Category("Q1")), None);
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(scale.position_of(&ScaleKey::Value(123.0)), Some(5.0));
    }
}
