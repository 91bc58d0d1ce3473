//! On-disk artifact store
//!
//! Each bound gets three blobs and a manifest in the data directory:
//!
//! ```text
//! PrimesUpTo_{B}_bitmap.bin     header + u64 LE words
//! PrimesUpTo_{B}_list.bin       header + u64 LE primes
//! PrimesUpTo_{B}_index.bin      header + (u64 prime, u64 rank) LE pairs
//! PrimesUpTo_{B}_manifest.json  cache key and counts, written last
//! ```
//!
//! Blobs are written to a `.tmp` sibling and renamed into place. Loading
//! memory-maps each blob when the `mmap` feature is on.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use primedex_core::{
    decode_pairs, decode_words, encode_pairs, encode_words, ArtifactHeader, ArtifactKind,
    ArtifactSet, ArtifactStore, PrimeBitmap, PrimeStore, PrimedexError, RankIndex,
};
use tracing::debug;

use crate::error::StoreError;
use crate::manifest::ArtifactManifest;

/// File-name prefix shared by every artifact of a bound
pub const ARTIFACT_PREFIX: &str = "PrimesUpTo";

/// Words encoded per write call when streaming payloads
const WRITE_CHUNK_WORDS: usize = 64 * 1024;

/// Artifact store rooted at a directory
#[derive(Debug, Clone)]
pub struct DiskStore {
    data_dir: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at `data_dir`; the directory is created on first save
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding the artifacts
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of one blob
    pub fn artifact_path(&self, bound: u64, kind: ArtifactKind) -> PathBuf {
        self.data_dir
            .join(format!("{ARTIFACT_PREFIX}_{bound}_{}.bin", kind.suffix()))
    }

    /// Path of the manifest
    pub fn manifest_path(&self, bound: u64) -> PathBuf {
        self.data_dir
            .join(format!("{ARTIFACT_PREFIX}_{bound}_manifest.json"))
    }

    /// Read and decode the manifest for `bound`, without checking its key
    pub fn read_manifest(&self, bound: u64) -> Result<ArtifactManifest, StoreError> {
        let path = self.manifest_path(bound);
        let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        serde_json::from_str(&text).map_err(|source| StoreError::Manifest { path, source })
    }

    fn write_manifest(&self, manifest: &ArtifactManifest) -> Result<(), StoreError> {
        let path = self.manifest_path(manifest.bound);
        let json = serde_json::to_vec_pretty(manifest).map_err(|source| StoreError::Manifest {
            path: path.clone(),
            source,
        })?;
        write_atomically(&path, |writer| writer.write_all(&json))
    }

    fn save_bitmap(&self, bound: u64, bitmap: &PrimeBitmap) -> Result<(), StoreError> {
        let path = self.artifact_path(bound, ArtifactKind::Bitmap);
        let header = ArtifactHeader::new(ArtifactKind::Bitmap, bound, bitmap.len());
        write_atomically(&path, |writer| {
            writer.write_all(&header.to_bytes())?;
            let mut buffer = Vec::with_capacity(WRITE_CHUNK_WORDS * 8);
            for chunk in bitmap.words().chunks(WRITE_CHUNK_WORDS) {
                buffer.clear();
                encode_words(chunk, &mut buffer);
                writer.write_all(&buffer)?;
            }
            Ok(())
        })
    }

    fn save_list(&self, bound: u64, store: &PrimeStore) -> Result<(), StoreError> {
        let path = self.artifact_path(bound, ArtifactKind::List);
        let header = ArtifactHeader::new(ArtifactKind::List, bound, store.len() as u64);
        write_atomically(&path, |writer| {
            writer.write_all(&header.to_bytes())?;
            let mut buffer = Vec::with_capacity(WRITE_CHUNK_WORDS * 8);
            for chunk in store.primes().chunks(WRITE_CHUNK_WORDS) {
                buffer.clear();
                encode_words(chunk, &mut buffer);
                writer.write_all(&buffer)?;
            }
            Ok(())
        })
    }

    fn save_index(&self, bound: u64, store: &PrimeStore) -> Result<(), StoreError> {
        let path = self.artifact_path(bound, ArtifactKind::Index);
        let index = store.rank_index();
        let header = ArtifactHeader::new(ArtifactKind::Index, bound, index.len() as u64);
        write_atomically(&path, |writer| {
            writer.write_all(&header.to_bytes())?;
            let mut buffer = Vec::with_capacity(WRITE_CHUNK_WORDS * 16);
            // List order keeps the file deterministic across runs
            for chunk in store.primes().chunks(WRITE_CHUNK_WORDS) {
                buffer.clear();
                encode_pairs(
                    chunk
                        .iter()
                        .filter_map(|p| index.get(p).map(|&rank| (*p, rank))),
                    &mut buffer,
                );
                writer.write_all(&buffer)?;
            }
            Ok(())
        })
    }

    fn load_bitmap(&self, bound: u64) -> Result<PrimeBitmap, StoreError> {
        let path = self.artifact_path(bound, ArtifactKind::Bitmap);
        let (header, words) = read_blob(&path, ArtifactKind::Bitmap, bound, decode_words)?;
        if header.count != bound.saturating_add(1) {
            return Err(StoreError::format(&path, PrimedexError::CorruptedData));
        }
        PrimeBitmap::from_words(words, header.count).map_err(|e| StoreError::format(&path, e))
    }

    fn load_list(&self, bound: u64) -> Result<Vec<u64>, StoreError> {
        let path = self.artifact_path(bound, ArtifactKind::List);
        let (_, primes) = read_blob(&path, ArtifactKind::List, bound, decode_words)?;
        Ok(primes)
    }

    fn load_index(&self, bound: u64) -> Result<RankIndex, StoreError> {
        let path = self.artifact_path(bound, ArtifactKind::Index);
        let (header, pairs) = read_blob(&path, ArtifactKind::Index, bound, decode_pairs)?;
        let index: RankIndex = pairs.into_iter().collect();
        if index.len() as u64 != header.count {
            // duplicate keys collapsed
            return Err(StoreError::format(&path, PrimedexError::CorruptedData));
        }
        Ok(index)
    }
}

impl ArtifactStore for DiskStore {
    type Error = StoreError;

    fn exists(&self, bound: u64) -> bool {
        self.manifest_path(bound).is_file()
            && [ArtifactKind::Bitmap, ArtifactKind::List, ArtifactKind::Index]
                .into_iter()
                .all(|kind| self.artifact_path(bound, kind).is_file())
    }

    fn load(&self, bound: u64) -> Result<ArtifactSet, StoreError> {
        let manifest_path = self.manifest_path(bound);
        let manifest = self.read_manifest(bound)?;
        if !manifest.is_current_for(bound) {
            return Err(StoreError::Stale {
                path: manifest_path,
                expected_bound: bound,
                found_bound: manifest.bound,
                found_version: manifest.format_version,
            });
        }

        let bitmap = self.load_bitmap(bound)?;
        let primes = self.load_list(bound)?;
        let index = self.load_index(bound)?;

        let list_path = self.artifact_path(bound, ArtifactKind::List);
        let store = PrimeStore::from_parts(bound, primes, index)
            .map_err(|e| StoreError::format(&list_path, e))?;
        let set = ArtifactSet::from_parts(bitmap, store)
            .map_err(|e| StoreError::format(&list_path, e))?;

        if !manifest.describes(&set) {
            return Err(StoreError::format(
                manifest_path,
                PrimedexError::CorruptedData,
            ));
        }

        debug!(bound, primes = set.store().len(), "loaded artifact set");
        Ok(set)
    }

    fn save(&self, set: &ArtifactSet) -> Result<(), StoreError> {
        let bound = set.bound();
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;

        // Drop the old manifest first so a half-replaced set never looks complete
        let manifest_path = self.manifest_path(bound);
        match fs::remove_file(&manifest_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(manifest_path, e)),
        }

        self.save_bitmap(bound, set.bitmap())?;
        self.save_list(bound, set.store())?;
        self.save_index(bound, set.store())?;
        self.write_manifest(&ArtifactManifest::for_set(set))?;

        debug!(bound, dir = %self.data_dir.display(), "saved artifact set");
        Ok(())
    }
}

/// Write through a temporary sibling, then rename over `path`
fn write_atomically<F>(path: &Path, fill: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let tmp_path = path.with_extension("tmp");
    let file = File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
    let mut writer = BufWriter::new(file);
    fill(&mut writer).map_err(|e| StoreError::io(&tmp_path, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| StoreError::io(&tmp_path, e.into_error()))?;
    file.sync_all().map_err(|e| StoreError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))
}

/// Open a blob, check its header against the requested key and decode the payload
fn read_blob<T, D>(
    path: &Path,
    kind: ArtifactKind,
    bound: u64,
    decode: D,
) -> Result<(ArtifactHeader, Vec<T>), StoreError>
where
    D: FnOnce(&[u8]) -> primedex_core::Result<Vec<T>>,
{
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;

    #[cfg(feature = "mmap")]
    // SAFETY: read-only mapping of a file this process does not modify while
    // the map is alive; concurrent writers are unsupported by the store.
    let bytes = unsafe { memmap2::Mmap::map(&file) }.map_err(|e| StoreError::io(path, e))?;

    #[cfg(not(feature = "mmap"))]
    let bytes = {
        use std::io::Read;
        let mut file = file;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| StoreError::io(path, e))?;
        bytes
    };

    let header = ArtifactHeader::from_bytes(&bytes).map_err(|e| StoreError::format(path, e))?;
    match header.check_key(kind, bound) {
        Ok(()) => {}
        Err(e) if e.is_stale() => {
            return Err(StoreError::Stale {
                path: path.to_path_buf(),
                expected_bound: bound,
                found_bound: header.bound,
                found_version: header.version,
            });
        }
        Err(e) => return Err(StoreError::format(path, e)),
    }

    let payload_size = header
        .payload_size()
        .map_err(|e| StoreError::format(path, e))?;
    let expected_len = ArtifactHeader::SIZE
        .checked_add(payload_size)
        .ok_or_else(|| StoreError::format(path, PrimedexError::ArraySizeOverflow))?;
    if bytes.len() != expected_len {
        return Err(StoreError::format(path, PrimedexError::CorruptedData));
    }

    let values = decode(&bytes[ArtifactHeader::SIZE..]).map_err(|e| StoreError::format(path, e))?;
    debug!(path = %path.display(), %kind, count = header.count, "read artifact blob");
    Ok((header, values))
}
