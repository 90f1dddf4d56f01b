/// One sample of a time series: an absolute millisecond instant and the
/// numeric value measured at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

/// A named sequence of samples, ascending by timestamp, ready for charting.
///
/// The name is the sensor identifier the samples came from, extracted from
/// the artifact filename by the assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
