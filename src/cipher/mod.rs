// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod front;
pub mod mode;
pub mod pkcs7;
pub mod streaming;

pub use front::{Cipher, CipherState};
pub use mode::{CipherMode, PaddingScheme};
pub use pkcs7::Pkcs7Padding;
pub use streaming::{CipherReader, CipherWriter};
