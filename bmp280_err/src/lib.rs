use std::fmt;
use std::io;
use std::num::ParseIntError;

/// Integer status handed back to collaborators, `NO_ERROR` on success.
pub type ReturnCode = i32;

pub const NO_ERROR : ReturnCode = 0;

//----------------------------------------------------------------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Device could not be opened or is not a BMP280
    Device,
    /// Driver failed to initialise
    Driver,
    /// Invalid argument
    InvalidArgument,
    /// SPI transaction failed to read or write data
    Spi,
    /// Pressure compensation hit a zero denominator
    DivideByZero,
    /// Operation called outside the Ready state
    InvalidState,
}


//----------------------------------------------------------------------------------------------------------------------------------
impl ErrorKind {
    pub fn return_code(&self) -> ReturnCode {
        match *self {
            ErrorKind::Device => 1,
            ErrorKind::Driver => 2,
            ErrorKind::InvalidArgument => 3,
            ErrorKind::Spi => 4,
            ErrorKind::DivideByZero => 5,
            ErrorKind::InvalidState => 6,
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
pub struct Bmp280Error {
    kind : ErrorKind,
    error : String
}

pub type Result<T> = std::result::Result<T, Bmp280Error>;


//----------------------------------------------------------------------------------------------------------------------------------
impl Bmp280Error {
    pub fn new(kind : ErrorKind, error : &str) -> Self {
        Self {
            kind,
            error : String::from(error)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.error
    }

    pub fn return_code(&self) -> ReturnCode {
        self.kind.return_code()
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl From<io::Error> for Bmp280Error {
    fn from(error: io::Error) -> Self {
        Self {
            kind : ErrorKind::Spi,
            error : format!("IO Error {}", error)
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl From<toml::de::Error> for Bmp280Error {
    fn from(error: toml::de::Error) -> Self {
        Self {
            kind : ErrorKind::InvalidArgument,
            error : format!("TOML Error {}", error)
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl From<ParseIntError> for Bmp280Error {
    fn from(error: ParseIntError) -> Self {
        Self {
            kind : ErrorKind::InvalidArgument,
            error : format!("Parse to Int Error {}", error)
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl fmt::Debug for Bmp280Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl fmt::Display for Bmp280Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for Bmp280Error {}
