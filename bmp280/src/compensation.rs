//!
//! Datasheet fixed-point compensation of raw ADC codes
//!

use bmp280_err::{Bmp280Error, ErrorKind, Result};
use crate::calibration::Calibration;

//----------------------------------------------------------------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// Pascals
    pub pressure : f64,
    /// Degrees Celsius
    pub temperature : f64,
}


//----------------------------------------------------------------------------------------------------------------------------------
/// Assembles a 20-bit ADC code from a `[MSB, LSB, XLSB]` burst. XLSB[3:0] is unused.
pub fn raw_adc(data : &[u8]) -> i32 {
    (((data[0] as i32) << 16) | ((data[1] as i32) << 8) | (data[2] as i32)) >> 4
}


//----------------------------------------------------------------------------------------------------------------------------------
/// Returns the temperature in degrees Celsius together with `t_fine`, which the
/// pressure compensation of the same measurement needs.
pub fn compensate_temperature(cal : &Calibration, raw : i32) -> (f64, i32) {
    let adc = raw as i64;
    let t1 = cal.dig_t1 as i64;

    let var1 = (((adc >> 3) - (t1 << 1)) * (cal.dig_t2 as i64)) >> 11;
    let var2 = (((((adc >> 4) - t1) * ((adc >> 4) - t1)) >> 12) * (cal.dig_t3 as i64)) >> 14;

    let t_fine = (var1 + var2) as i32;
    let temperature = (t_fine as i64 * 5 + 128) >> 8;
    (temperature as f64 / 100.0, t_fine)
}


//----------------------------------------------------------------------------------------------------------------------------------
/// Returns the pressure in Pascals. `t_fine` must come from the temperature
/// compensation of the same measurement.
pub fn compensate_pressure(cal : &Calibration, raw : i32, t_fine : i32) -> Result<f64> {
    let mut var1 = (t_fine as i64) - 128000;
    let mut var2 = var1 * var1 * (cal.dig_p6 as i64);
    var2 += (var1 * (cal.dig_p5 as i64)) << 17;
    var2 += (cal.dig_p4 as i64) << 35;
    var1 = ((var1 * var1 * (cal.dig_p3 as i64)) >> 8) + ((var1 * (cal.dig_p2 as i64)) << 12);
    var1 = (((1_i64 << 47) + var1) * (cal.dig_p1 as i64)) >> 33;

    if var1 == 0 {
        return Err(Bmp280Error::new(ErrorKind::DivideByZero, "Pressure compensation: var1 == 0"));
    }

    let mut p = 1_048_576 - (raw as i64);
    p = (((p << 31) - var2) * 3125) / var1;
    let var1 = ((cal.dig_p9 as i64) * (p >> 13) * (p >> 13)) >> 25;
    let var2 = ((cal.dig_p8 as i64) * p) >> 19;
    p = ((p + var1 + var2) >> 8) + ((cal.dig_p7 as i64) << 4);

    // Q24.8
    Ok((p as u32) as f64 / 256.0)
}


//----------------------------------------------------------------------------------------------------------------------------------
/// Converts one temperature and one pressure burst. Temperature goes first so its `t_fine` feeds the
/// pressure step.
pub fn compensate(cal : &Calibration, raw_temp : i32, raw_press : i32) -> Result<Measurement> {
    let (temperature, t_fine) = compensate_temperature(cal, raw_temp);
    let pressure = compensate_pressure(cal, raw_press, t_fine)?;
    Ok(Measurement { pressure, temperature })
}
