// Workspace container. Run the dashboard with `cargo run -p engine -- [settings.json]`.
fn main() {
    println!("delivery-insights: run `cargo run -p engine -- [settings.json]` to print the order dashboard");
}
