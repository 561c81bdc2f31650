// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
                         _
  ___ _   _ _ __ ___  _ __ | |_ ___  _ __ ___
 / __| | | | '_ ` _ \| '_ \| __/ _ \| '_ ` _ \
 \__ \ |_| | | | | | | |_) | || (_) | | | | | |
 |___/\__, |_| |_| |_| .__/ \__\___/|_| |_| |_|
      |___/          |_|       gateway

    Symptom-based Disease Prediction Gateway
"#;
    println!("{}", banner);
}
