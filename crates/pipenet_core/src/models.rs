/// A pipeline segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: u32,
    pub name: String,
    pub length: f64,
    pub diameter: u32,
    pub in_repair: bool,
}

/// A compressor station and its workshop capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressorStation {
    pub id: u32,
    pub name: String,
    pub total_workshops: u32,
    pub working_workshops: u32,
}

impl CompressorStation {
    /// Return the share of workshops not currently in use, in percent.
    ///
    /// Computed as `(1 - working / total) * 100` with real division. Stations read
    /// from a hand-edited file are not re-validated, so a zero total yields a
    /// non-finite value rather than a panic.
    pub fn unused_percent(&self) -> f64 {
        (1.0 - f64::from(self.working_workshops) / f64::from(self.total_workshops)) * 100.0
    }
}

/// Field values for a pipe that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPipe {
    pub name: String,
    pub length: f64,
    pub diameter: u32,
    pub in_repair: bool,
}

/// Field values for a station that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    pub name: String,
    pub total_workshops: u32,
    pub working_workshops: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(total: u32, working: u32) -> CompressorStation {
        CompressorStation {
            id: 1,
            name: "KS-1".into(),
            total_workshops: total,
            working_workshops: working,
        }
    }

    #[test]
    fn test_unused_percent_uses_real_division() {
        assert_eq!(station(4, 1).unused_percent(), 75.0);
        assert_eq!(station(4, 4).unused_percent(), 0.0);
        assert!((station(3, 1).unused_percent() - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn test_unused_percent_zero_total_is_not_finite() {
        assert!(!station(0, 0).unused_percent().is_finite());
    }
}
