mod common;
mod rewards;
