pub mod health_service;
pub mod submission_service;
pub mod view;
pub mod whatsapp;
