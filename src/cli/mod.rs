pub mod args;
pub mod meetings;
pub mod upload;

pub use args::{Cli, CliCommand};
pub use meetings::{handle_list_command, handle_show_command, handle_title_command};
pub use upload::handle_upload_command;
