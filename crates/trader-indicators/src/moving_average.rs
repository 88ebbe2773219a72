//! Simple and exponential moving averages.

use trader_core::{Indicator, IndicatorError};

/// Simple moving average over a fixed window.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return Vec::new();
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / self.period as f64);

        // Slide the window instead of re-summing it.
        for i in self.period..data.len() {
            sum += data[i] - data[i - self.period];
            result.push(sum / self.period as f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential moving average.
///
/// Smoothing factor is `2 / (span + 1)`. The series is seeded with the
/// first input value, so the output has the same length as the input and
/// matches a bar-by-bar recursive computation from the start of the
/// window.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "EMA span must be greater than 0");
        Self {
            span,
            alpha: 2.0 / (span as f64 + 1.0),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.is_empty() {
            return Vec::new();
        }

        let mut result = Vec::with_capacity(data.len());
        let mut ema = data[0];
        result.push(ema);

        for &value in &data[1..] {
            ema = self.alpha * value + (1.0 - self.alpha) * ema;
            result.push(ema);
        }

        result
    }

    fn period(&self) -> usize {
        self.span
    }

    fn name(&self) -> &str {
        "EMA"
    }

    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_slides_over_window() {
        let sma = Sma::new(3);
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sma_short_input_yields_nothing() {
        let sma = Sma::new(10);
        assert!(sma.calculate(&[1.0, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn test_ema_seeds_with_first_value() {
        let ema = Ema::new(3);
        let data = [10.0, 20.0, 30.0];
        let result = ema.calculate(&data);

        // alpha = 0.5
        assert_eq!(result.len(), 3);
        assert!((result[0] - 10.0).abs() < 1e-10);
        assert!((result[1] - 15.0).abs() < 1e-10);
        assert!((result[2] - 22.5).abs() < 1e-10);
    }

    #[test]
    fn test_ema_converges_toward_constant_series() {
        let ema = Ema::new(9);
        let data = vec![50.0; 100];
        let result = ema.calculate(&data);

        assert!((result.last().unwrap() - 50.0).abs() < 1e-10);
    }
}
