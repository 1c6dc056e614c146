//! 出力ファイルユーティリティ（gzip対応）

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const WRITER_BUF_CAP: usize = 1 << 20;

/// 生成ファイルの出力先
///
/// gzip は `close` で末尾を書き切るまで壊れたファイルになるので、必ず `close` する。
#[must_use = "call .close() to finish the output"]
pub enum Writer {
    Plain(BufWriter<File>),
    Stdout(BufWriter<io::Stdout>),
    Gz(GzEncoder<BufWriter<File>>),
}

impl Writer {
    fn inner(&mut self) -> &mut dyn Write {
        match self {
            Writer::Plain(w) => w,
            Writer::Stdout(w) => w,
            Writer::Gz(w) => w,
        }
    }

    /// gzip のトレーラを書き、バッファを吐き出す
    pub fn close(self) -> io::Result<()> {
        let mut buffered = match self {
            Writer::Plain(w) => w,
            Writer::Gz(enc) => enc.finish()?,
            Writer::Stdout(mut w) => return w.flush(),
        };
        buffered.flush()
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner().flush()
    }
}

/// `-` は標準出力、拡張子 `.gz` は gzip 圧縮して書く
pub fn open_writer<P: AsRef<Path>>(path: P) -> io::Result<Writer> {
    let p = path.as_ref();
    if p.to_string_lossy() == "-" {
        return Ok(Writer::Stdout(BufWriter::new(io::stdout())));
    }
    let f = BufWriter::with_capacity(WRITER_BUF_CAP, File::create(p)?);
    let ext = p.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    if ext == "gz" {
        return Ok(Writer::Gz(GzEncoder::new(f, Compression::default())));
    }
    Ok(Writer::Plain(f))
}
