use gcode_command::{Command, LineParser};

fn main() {
    println!("=== G-code Command Parser Demo ===");

    let parser = LineParser::new().with_classification("demo").with_tag("source:demo");

    let test_lines = [
        "G1 X10 Y20.5 Z0.2 F1500",
        "M104 S200 T0",
        "G28.2 X Y",
        "M117 Print complete",
        "T3",
        "F2000",
        "; just a comment",
    ];

    for line in test_lines {
        println!("\nInput: '{}'", line);
        match parser.parse(line) {
            Ok(cmd) => {
                println!("Parsed:    {:?}", cmd);
                println!("Canonical: {}", cmd.canonical_line());
            }
            Err(err) => println!("Error:     {}", err),
        }
    }

    let built = Command::builder("G0")
        .param('x', 5)
        .param('y', 7.5)
        .feedrate(3000)
        .build();
    match built {
        Ok(cmd) => println!("\nBuilt: {}", cmd),
        Err(err) => println!("\nBuild failed: {}", err),
    }
}
