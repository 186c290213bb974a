//! 默认工作区内容

use crate::models::{VfsError, VfsTree};

const INDEX_JS: &str = r#"const numbers = [1, 2, 3, 4, 5];
const doubled = numbers.map((n) => n * 2);

function greet(name) {
  return `Hello, ${name}!`;
}

console.log(greet("webcode"));
console.log("doubled:", doubled);
"#;

const STYLES_CSS: &str = r#"body {
  font-family: system-ui, sans-serif;
  margin: 0;
  padding: 20px;
}

.container {
  max-width: 800px;
  margin: 0 auto;
}
"#;

const EXAMPLE_PY: &str = r#"def greet(name):
    return f"Hello, {name}!"


numbers = [1, 2, 3, 4, 5]
print([n * 2 for n in numbers])
print(greet("webcode"))
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <link rel="stylesheet" href="styles.css" />
    <title>webcode</title>
  </head>
  <body>
    <div class="container">
      <h1>Hello from webcode</h1>
    </div>
    <script src="index.js"></script>
  </body>
</html>
"#;

const TYPESCRIPT_TS: &str = r#"interface User {
  id: number;
  name: string;
}

const users: User[] = [
  { id: 1, name: "Ada" },
  { id: 2, name: "Linus" },
];

console.log(users.map((u) => u.name).join(", "));
"#;

const README_MD: &str = r#"# webcode

A workspace with a few sample files. Open one, edit it, and run it.
"#;

fn build() -> Result<VfsTree, VfsError> {
    let mut tree = VfsTree::new();
    let src = tree.create_directory("/", "src")?;
    tree.create_file(&src, "index.js", INDEX_JS)?;
    tree.create_file(&src, "styles.css", STYLES_CSS)?;
    tree.create_file(&src, "example.py", EXAMPLE_PY)?;
    tree.create_file(&src, "index.html", INDEX_HTML)?;
    tree.create_file(&src, "typescript-example.ts", TYPESCRIPT_TS)?;
    tree.create_file("/", "README.md", README_MD)?;
    Ok(tree)
}

/// The tree a fresh workspace starts from.
pub fn default_tree() -> VfsTree {
    build().unwrap_or_else(|e| {
        tracing::error!(error = %e, "default workspace could not be built");
        VfsTree::new()
    })
}

/// Default tree when seeding is enabled, an empty root otherwise.
pub fn initial_tree(seed: bool) -> VfsTree {
    if seed {
        default_tree()
    } else {
        VfsTree::new()
    }
}
