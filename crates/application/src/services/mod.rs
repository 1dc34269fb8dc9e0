//! Application services

mod gateway_service;

pub use gateway_service::GatewayService;
