//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::domain::{CandyMachineServiceTrait, DefaultCandyMachineService};

pub struct AppState<S: CandyMachineServiceTrait> {
    pub candy_machine_service: Arc<S>,
}

impl<S: CandyMachineServiceTrait> AppState<S> {
    pub fn new(candy_machine_service: Arc<S>) -> Self {
        Self {
            candy_machine_service,
        }
    }
}

impl<S: CandyMachineServiceTrait> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            candy_machine_service: Arc::clone(&self.candy_machine_service),
        }
    }
}

pub type DefaultAppState = AppState<DefaultCandyMachineService>;
