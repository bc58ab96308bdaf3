use std::{path::PathBuf, time::Duration};

use super::request::ConversionRequest;

pub enum Update {
    Started(PathBuf),
    Finished(ConversionRequest, Duration),
    Failed(PathBuf, String),
}
