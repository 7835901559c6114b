use vergen::EmitBuilder;

fn main() {
    // Outside a git checkout vergen emits placeholder values instead of failing,
    // and the version handler reads them through `option_env!`.
    if let Err(e) = EmitBuilder::builder()
        .build_timestamp()
        .git_sha(true)
        .emit()
    {
        println!("cargo:warning=Unable to generate build metadata: {e}");
    }
}
