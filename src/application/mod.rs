// Application layer - Use cases and persistence seams
pub mod chart_repository;
pub mod chart_service;
