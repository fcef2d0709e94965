//! Integration tests for termynal.

mod cast_test;
mod cli_test;
mod helpers;
mod lines_test;
mod play_test;
mod player_test;
mod render_test;
