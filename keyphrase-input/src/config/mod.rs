//! Configuration for the keyphrase application

pub mod settings;
