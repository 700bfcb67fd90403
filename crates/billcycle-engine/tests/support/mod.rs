#![allow(dead_code)]

pub mod billing_testkit;
