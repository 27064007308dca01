use std::path::Path;
use std::str::FromStr;
use toml::{Table, Value};
use bmp280_err::{Bmp280Error, ErrorKind, Result};

pub const DEFAULT_PATH : &str = "bmp280.toml";
pub const DEFAULT_SPIDEV : &str = "/dev/spidev0.1";

const DEFAULT_SAMPLES : u32 = 60;
const DEFAULT_PERIOD_SECS : u32 = 1;
const DEFAULT_AVERAGE_WINDOW : usize = 30;

//----------------------------------------------------------------------------------------------------------------------------------
pub struct Config {
    config : Table
}


//----------------------------------------------------------------------------------------------------------------------------------
impl FromStr for Config {
    type Err = Bmp280Error;

    fn from_str(config_str : &str) -> Result<Self> {
        let config = config_str.parse()?;
//      dbg!(&config);

        Ok(Self {
            config
        })
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl Config {

    //------------------------------------------------------------------------------------------------------------------------------
    pub fn load(path : &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path).map_err(|error| {
            Bmp280Error::new(ErrorKind::InvalidArgument, &format!("Failed to read {:#?} {}", path, error))
        })?;
        config_str.parse()
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn get(&self, section : &str, key : &str) -> Option<&Value> {
        self.config.get(section)?.get(key)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn get_integer<T : TryFrom<i64>>(&self, section : &str, key : &str, default : T) -> Result<T> {
        let value = match self.get(section, key) {
            None => return Ok(default),
            Some(value) => value
        };
        match value.as_integer() {
            Some(number) if number > 0 => T::try_from(number).map_err(|_| {
                Bmp280Error::new(ErrorKind::InvalidArgument, &format!("{}.{} = {} is out of range", section, key, number))
            }),
            _ => Err(Bmp280Error::new(ErrorKind::InvalidArgument,
                &format!("{}.{} must be a positive integer", section, key)))
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn get_dev_name(&self) -> Result<&str> {
        match self.get("sensor", "spidev") {
            None => Ok(DEFAULT_SPIDEV),
            Some(value) => value.as_str().ok_or_else(|| {
                Bmp280Error::new(ErrorKind::InvalidArgument, "sensor.spidev must be a string")
            })
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn get_samples(&self) -> Result<u32> {
        self.get_integer("monitor", "samples", DEFAULT_SAMPLES)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn get_sample_period(&self) -> Result<u32> {
        self.get_integer("monitor", "period_secs", DEFAULT_PERIOD_SECS)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn get_average_window(&self) -> Result<usize> {
        self.get_integer("monitor", "average_window", DEFAULT_AVERAGE_WINDOW)
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config : Config = "".parse().unwrap();
        assert_eq!(config.get_dev_name().unwrap(), "/dev/spidev0.1");
        assert_eq!(config.get_samples().unwrap(), 60);
        assert_eq!(config.get_sample_period().unwrap(), 1);
        assert_eq!(config.get_average_window().unwrap(), 30);
    }

    #[test]
    fn reads_sections() {
        let config : Config = "[sensor]\nspidev = \"/dev/spidev1.0\"\n\n[monitor]\nsamples = 5\nperiod_secs = 2\naverage_window = 4\n"
            .parse().unwrap();
        assert_eq!(config.get_dev_name().unwrap(), "/dev/spidev1.0");
        assert_eq!(config.get_samples().unwrap(), 5);
        assert_eq!(config.get_sample_period().unwrap(), 2);
        assert_eq!(config.get_average_window().unwrap(), 4);
    }

    #[test]
    fn wrong_types_are_invalid_argument() {
        let config : Config = "[sensor]\nspidev = 3\n[monitor]\nsamples = \"many\"\naverage_window = 0\n".parse().unwrap();
        assert_eq!(config.get_dev_name().unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(config.get_samples().unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(config.get_average_window().unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn oversized_values_are_rejected() {
        let config : Config = "[monitor]\nsamples = 4294967296\nperiod_secs = 4294967297\n".parse().unwrap();
        assert_eq!(config.get_samples().unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(config.get_sample_period().unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(config.get_average_window().unwrap(), 30);
    }

    #[test]
    fn malformed_toml() {
        let err = "[sensor".parse::<Config>().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn missing_file() {
        let err = Config::load(Path::new("/nonexistent/bmp280.toml")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
