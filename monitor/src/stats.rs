use std::collections::VecDeque;

/// Moving average over the last `window` readings, published once per `window` readings.
pub struct RunningAverage {
    window : usize,
    samples : VecDeque<f64>,
    sum : f64,
    num_of : usize,
}


impl RunningAverage {

    //------------------------------------------------------------------------------------------------------------------------------
    pub fn new(window : usize) -> Self {
        RunningAverage {
            window,
            samples : VecDeque::with_capacity(window),
            sum : 0.0,
            num_of : 0
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn add(&mut self, value : f64) -> Option<f64> {
        if self.samples.len() == self.window {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum -= oldest;
            }
        }
        self.samples.push_back(value);
        self.sum += value;

        self.num_of += 1;
        if self.num_of < self.window {
            return None;
        }
        self.num_of = 0;
        Some(self.sum / (self.window as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn publishes_once_per_window() {
        let mut ave = RunningAverage::new(3);
        assert_eq!(ave.add(20.4), None);
        assert_eq!(ave.add(10.6), None);
        let first = ave.add(5.6).unwrap();
        assert_relative_eq!(first, (20.4 + 10.6 + 5.6) / 3.0, max_relative = 0.0001);

        assert_eq!(ave.add(3.4), None);
        assert_eq!(ave.add(9.6), None);
        let second = ave.add(6.0).unwrap();
        assert_relative_eq!(second, (3.4 + 9.6 + 6.0) / 3.0, max_relative = 0.0001);
    }

    #[test]
    fn oldest_sample_drops_out() {
        let mut ave = RunningAverage::new(2);
        ave.add(100000.0);
        ave.add(100002.0);
        ave.add(100010.0);
        let latest = ave.add(100020.0).unwrap();
        assert_relative_eq!(latest, 100015.0, max_relative = 0.0001);
        assert_eq!(ave.samples.len(), 2);
    }

    #[test]
    fn window_of_one_passes_through() {
        let mut ave = RunningAverage::new(1);
        assert_eq!(ave.add(25.08), Some(25.08));
        assert_eq!(ave.add(24.5), Some(24.5));
    }
}
