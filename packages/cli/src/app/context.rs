use std::path::PathBuf;

pub struct AppContext {
    pub roster_path: Option<PathBuf>,
    pub chunk_size: Option<usize>,
}
