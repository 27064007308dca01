//!
//! Polls a BMP280 on spidev and prints readings
//!

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::time::sleep;
use log::error;

use bmp280::{Measurement, Session};
use bmp280_err::{Bmp280Error, ErrorKind, Result};
use config::Config;

use crate::stats::RunningAverage;

mod stats;

struct Settings {
    dev_name : String,
    samples : u32,
    period_secs : u32,
    average_window : usize,
}


//----------------------------------------------------------------------------------------------------------------------------------
fn load_settings(path : Option<String>) -> Result<Settings> {
    let config = match path {
        Some(path) => Config::load(Path::new(&path))?,
        None if Path::new(config::DEFAULT_PATH).exists() => Config::load(Path::new(config::DEFAULT_PATH))?,
        None => "".parse()?
    };

    Ok(Settings {
        dev_name : String::from(config.get_dev_name()?),
        samples : config.get_samples()?,
        period_secs : config.get_sample_period()?,
        average_window : config.get_average_window()?,
    })
}


//----------------------------------------------------------------------------------------------------------------------------------
fn create_runtime() -> Result<Runtime> {
    Builder::new_current_thread().enable_time().build().map_err(|error| {
        Bmp280Error::new(ErrorKind::Driver, &format!("Could not start runtime {}", error))
    })
}


//----------------------------------------------------------------------------------------------------------------------------------
fn print_registers(session : &mut Session) -> Result<()> {
    let config = session.get_config()?;
    println!("Standby: 0x{:x}, Coefficient: 0x{:x}", config.standby, config.filter_coefficient);

    let ctrl_meas = session.get_ctrl_meas()?;
    println!("osrs_p: 0x{:x}, osrs_t: 0x{:x}, mode: 0x{:x}", ctrl_meas.osrs_p, ctrl_meas.osrs_t, ctrl_meas.mode);
    Ok(())
}


//----------------------------------------------------------------------------------------------------------------------------------
/// Lines for the windowed averages completed by this reading, if any.
fn window_report(reading : &Measurement, temperature : &mut RunningAverage, pressure : &mut RunningAverage) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(ave) = temperature.add(reading.temperature) {
        lines.push(format!("Average temperature: {:.2}", ave));
    }
    if let Some(ave) = pressure.add(reading.pressure) {
        lines.push(format!("Average pressure: {:.2}", ave));
    }
    lines
}


//----------------------------------------------------------------------------------------------------------------------------------
/// No wait after the final sample.
fn waits_after(sample : u32, samples : u32) -> bool {
    sample + 1 < samples
}


//----------------------------------------------------------------------------------------------------------------------------------
fn poll(session : &mut Session, settings : &Settings, rt : &Runtime) {
    let mut pressure = RunningAverage::new(settings.average_window);
    let mut temperature = RunningAverage::new(settings.average_window);

    for sample in 0..settings.samples {
        match session.measure() {
            Ok(reading) => {
                println!("Temperature: {:.2}, Pressure: {:.2}, rv: 0", reading.temperature, reading.pressure);
                for line in window_report(&reading, &mut temperature, &mut pressure) {
                    println!("{}", line);
                }
            },
            Err(error) => println!("Measurement failed: {}, rv: {}", error, error.return_code())
        }
        if waits_after(sample, settings.samples) {
            rt.block_on(sleep(Duration::from_secs(settings.period_secs.into())));
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
fn run(settings : &Settings) -> Result<()> {
    let rt = create_runtime()?;

    let mut session : Session = Session::new();
    println!("Reading from {} for BMP280", settings.dev_name);
    session.init(&settings.dev_name)?;

    if let Err(error) = print_registers(&mut session) {
        error!("Could not read registers: {}", error);
    }

    poll(&mut session, settings, &rt);

    session.deinit()?;
    Ok(())
}


/// Application entry point
fn main() -> ExitCode {
    env_logger::init();

    let settings = match load_settings(std::env::args().nth(1)) {
        Ok(settings) => settings,
        Err(error) => {
            error!("Config error: {}", error);
            return ExitCode::from(error.return_code() as u8);
        }
    };

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            println!("BMP280 failed: {}, rv: {}", error, error.return_code());
            ExitCode::from(error.return_code() as u8)
        }
    }
}
