use crate::codec;
use crate::codec::CodecError;
use crate::store::{RecordRepository, RecordStore};
use std::path::{Path, PathBuf};

/// 텍스트 파일 하나에 모든 레코드를 기록하는 저장소
#[derive(Debug, Clone)]
pub struct FlatFileRepository {
    path: PathBuf,
}

impl FlatFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordRepository for FlatFileRepository {
    fn save(&self, store: &RecordStore) -> Result<(), CodecError> {
        codec::save(&self.path, store)
    }

    fn load(&self, store: &mut RecordStore) -> Result<(), CodecError> {
        codec::load(&self.path, store)
    }
}
