use std::env;
use std::fs;
use std::io::{Error, ErrorKind, Result};
use std::path::PathBuf;

use prost::Message;

fn main() -> Result<()> {
    let proto_root = PathBuf::from("proto");

    let protos = [
        "envoy/admin/v3/config_dump.proto",
        "envoy/admin/v3/listeners.proto",
        "envoy/config/listener/v3/listener.proto",
        "meshscope/v1/opaque.proto",
    ];

    let proto_paths: Vec<PathBuf> = protos.iter().map(|p| proto_root.join(p)).collect();
    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(|e| Error::new(ErrorKind::Other, e))?);

    // protox bundles the google.protobuf well-known types, so no protoc is needed.
    let descriptors = protox::compile(&proto_paths, [&proto_root])
        .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;

    fs::write(
        out_dir.join("envoy_descriptor.bin"),
        descriptors.encode_to_vec(),
    )?;

    prost_build::Config::new()
        .enable_type_names()
        .compile_fds(descriptors)?;

    println!("cargo:rerun-if-changed={}", proto_root.display());

    Ok(())
}
