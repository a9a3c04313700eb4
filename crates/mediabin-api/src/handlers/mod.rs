mod list;
mod upload;

pub use list::list_media_files;
pub use upload::create_media_file;
