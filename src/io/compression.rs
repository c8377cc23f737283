#[cfg(feature = "compression")]
mod inner {
    use std::io::Read;
    use std::path::Path;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Compression {
        None,
        Gz,
    }

    impl Compression {
        pub fn name(&self) -> &str {
            match self {
                Compression::None => "none",
                Compression::Gz => "gzip",
            }
        }

        /// Guesses the compression from the file extension.
        pub fn from_path(path: &Path) -> Self {
            match path
                .extension()
                .and_then(|ext| ext.to_str())
            {
                Some("gz") | Some("bgz") => Compression::Gz,
                _ => Compression::None,
            }
        }

        pub fn get_decoder<R: Read + 'static>(
            &self,
            handle: R,
        ) -> Box<dyn Read> {
            match self {
                // bgzip output is a series of gzip members
                Compression::Gz => Box::new(flate2::read::MultiGzDecoder::new(handle)),
                Compression::None => Box::new(handle),
            }
        }
    }

}

#[cfg(feature = "compression")]
pub use inner::*;
