/*
MIT License
Copyright (c) Snobal contributors
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
use clap::Parser;
use snobal_run::{cli::SimOptions, driver, error_msgs};

fn main() {
    let options = SimOptions::parse();

    let result = match &options.output {
        Some(path) => match std::fs::File::create(path) {
            Ok(f) => driver::run(&options, std::io::BufWriter::new(f)),
            Err(e) => {
                eprintln!("Error: could not create '{path}': {e}");
                std::process::exit(3);
            }
        },
        None => driver::run(&options, std::io::stdout().lock()),
    };

    if let Err(e) = result {
        error_msgs::print_error(&e);
        std::process::exit(e.kind().exit_code());
    }
}
