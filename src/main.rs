fn main() -> anyhow::Result<()> {
    vitalsense::run()
}
