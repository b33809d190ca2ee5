// Repository Implementations
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// sqlx-backed implementations of the persistence boundary traits

pub mod client_repository;
pub mod notification_repository;
pub mod settings_repository;

pub use client_repository::ClientRepositoryImpl;
pub use notification_repository::NotificationRepositoryImpl;
pub use settings_repository::SettingsRepositoryImpl;
