pub mod decode;
pub mod encode;

#[derive(clap::Subcommand)]
pub enum TlkCommands {
    /// Decode a TLK file into a JSON string table
    Decode(decode::DecodeArgs),
    /// Encode a JSON string table into a TLK file
    Encode(encode::EncodeArgs),
}

impl TlkCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            TlkCommands::Decode(decode) => decode.handle(),
            TlkCommands::Encode(encode) => encode.handle(),
        }
    }
}
