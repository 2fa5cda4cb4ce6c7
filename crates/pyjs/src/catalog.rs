//! Built-in example programs.
//!
//! Only the Python side is stored; the JavaScript side is produced by the
//! translator whenever an example is shown.

use pyjs_translate::Transpiler;
use serde::{Deserialize, Serialize};

/// A Python example program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    /// Short identifier for the command line.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    pub python: &'static str,
}

/// An example together with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedExample {
    pub name: String,
    pub python: String,
    pub javascript: String,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        slug: "function",
        name: "Simple function",
        python: r#"def greet(name):
    return f"Hello, {name}!"

print(greet("Maria"))"#,
    },
    Example {
        slug: "control-flow",
        name: "Control flow",
        python: r#"age = 20
if age >= 18:
    print("Adult")
else:
    print("Minor")

for i in range(5):
    print(f"Number: {i}")"#,
    },
    Example {
        slug: "lists",
        name: "Lists and loops",
        python: r#"numbers = [1, 2, 3, 4, 5]
total = 0

for n in numbers:
    total += n

print(f"Total: {total}")
print(f"Count: {len(numbers)}")"#,
    },
    Example {
        slug: "class",
        name: "Simple class",
        python: r#"class Person:
    def __init__(self, name, age):
        self.name = name
        self.age = age

    def introduce(self):
        return f"I am {self.name}, {self.age} years old"

p = Person("Ana", 25)
print(p.introduce())"#,
    },
];

impl Example {
    pub fn render(&self, transpiler: &Transpiler) -> RenderedExample {
        RenderedExample {
            name: self.name.to_string(),
            python: self.python.to_string(),
            javascript: transpiler.transpile(self.python),
        }
    }
}

/// Look up an example by slug or (case-insensitive) display name.
pub fn find(key: &str) -> Option<&'static Example> {
    EXAMPLES
        .iter()
        .find(|example| example.slug == key || example.name.eq_ignore_ascii_case(key))
}

pub fn render_all(transpiler: &Transpiler) -> Vec<RenderedExample> {
    EXAMPLES
        .iter()
        .map(|example| example.render(transpiler))
        .collect()
}
