// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! Series solutions of Lane-Emden type equations by the Adomian Decomposition Method,
//! built on a small exact symbolic engine.
pub mod ADM;
pub mod Utils;
pub mod symbolic;
