use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata behind `notify-rs --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
