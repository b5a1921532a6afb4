fn main() -> Result<(), Box<dyn std::error::Error>> {
    sparkle_chat::cli::main()
}
