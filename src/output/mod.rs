// Output module - Terminal rendering
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0

pub mod table;
