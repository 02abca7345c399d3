//! Static vocabularies of the restricted contract language.
//!
//! These lists are curated and versioned with the crate so that verification
//! never depends on the interpreter installed on the host.

/// Marker that exposes a function as a public entry point.
pub const EXPORT_DECORATOR: &str = "export";
/// Marker for the module's one-time initializer.
pub const CONSTRUCT_DECORATOR: &str = "construct";
pub const VALID_DECORATORS: &[&str] = &[EXPORT_DECORATOR, CONSTRUCT_DECORATOR];

/// Storage primitives that may be declared against the contract's own namespace.
pub const DECLARABLE_STORAGE: &[&str] = &["Hash", "Variable"];
/// Every constructor whose result is a module-level storage declaration.
pub const STORAGE_CONSTRUCTORS: &[&str] =
    &["Hash", "Variable", "ForeignHash", "ForeignVariable", "LogEvent"];
/// Keyword arguments that would bind a storage primitive to another contract.
pub const FOREIGN_STORAGE_KEYWORDS: &[&str] = &["contract", "name"];

/// Runtime accessor token that contracts may never touch.
pub const RUNTIME_TOKEN: &str = "rt";

pub const ALLOWED_ANNOTATIONS: &[&str] = &[
    "dict",
    "list",
    "str",
    "int",
    "float",
    "bool",
    "datetime.timedelta",
    "datetime.datetime",
    "Any",
];

/// Builtins that are otherwise illegal but explicitly permitted.
pub const PERMITTED_BUILTINS: &[&str] = &["float"];

/// Interpreter builtins that contracts may not reference.
pub const ILLEGAL_BUILTINS: &[&str] = &[
    "ArithmeticError",
    "AssertionError",
    "AttributeError",
    "BaseException",
    "BaseExceptionGroup",
    "BlockingIOError",
    "BrokenPipeError",
    "BufferError",
    "BytesWarning",
    "ChildProcessError",
    "ConnectionAbortedError",
    "ConnectionError",
    "ConnectionRefusedError",
    "ConnectionResetError",
    "DeprecationWarning",
    "EOFError",
    "Ellipsis",
    "EncodingWarning",
    "EnvironmentError",
    "ExceptionGroup",
    "FileExistsError",
    "FileNotFoundError",
    "FloatingPointError",
    "FutureWarning",
    "GeneratorExit",
    "IOError",
    "ImportError",
    "ImportWarning",
    "IndentationError",
    "IndexError",
    "InterruptedError",
    "IsADirectoryError",
    "KeyError",
    "KeyboardInterrupt",
    "LookupError",
    "MemoryError",
    "ModuleNotFoundError",
    "NameError",
    "NotADirectoryError",
    "NotImplemented",
    "NotImplementedError",
    "OSError",
    "OverflowError",
    "PendingDeprecationWarning",
    "PermissionError",
    "ProcessLookupError",
    "RecursionError",
    "ReferenceError",
    "ResourceWarning",
    "RuntimeError",
    "RuntimeWarning",
    "StopAsyncIteration",
    "StopIteration",
    "SyntaxError",
    "SyntaxWarning",
    "SystemError",
    "SystemExit",
    "TabError",
    "TimeoutError",
    "TypeError",
    "UnboundLocalError",
    "UnicodeDecodeError",
    "UnicodeEncodeError",
    "UnicodeError",
    "UnicodeTranslateError",
    "UnicodeWarning",
    "UserWarning",
    "ValueError",
    "Warning",
    "ZeroDivisionError",
    "__build_class__",
    "__debug__",
    "__doc__",
    "__import__",
    "__loader__",
    "__name__",
    "__package__",
    "__spec__",
    "aiter",
    "anext",
    "breakpoint",
    "callable",
    "classmethod",
    "compile",
    "complex",
    "copyright",
    "credits",
    "delattr",
    "dir",
    "enumerate",
    "eval",
    "exec",
    "exit",
    "float",
    "getattr",
    "globals",
    "hasattr",
    "hash",
    "help",
    "id",
    "input",
    "iter",
    "license",
    "locals",
    "memoryview",
    "next",
    "object",
    "open",
    "print",
    "property",
    "quit",
    "repr",
    "setattr",
    "slice",
    "staticmethod",
    "super",
    "type",
    "vars",
];

/// Standard-library and builtin module names (root segments).
pub const STDLIB_MODULES: &[&str] = &[
    "__future__", "abc", "aifc", "antigravity", "argparse", "array", "ast", "asynchat",
    "asyncio", "asyncore", "atexit", "audioop", "base64", "bdb", "binascii", "bisect",
    "builtins", "bz2", "cProfile", "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd",
    "code", "codecs", "codeop", "collections", "colorsys", "compileall", "concurrent",
    "configparser", "contextlib", "contextvars", "copy", "copyreg", "crypt", "csv", "ctypes",
    "curses", "dataclasses", "datetime", "dbm", "decimal", "difflib", "dis", "distutils",
    "doctest", "email", "encodings", "ensurepip", "enum", "errno", "faulthandler", "fcntl",
    "filecmp", "fileinput", "fnmatch", "fractions", "ftplib", "functools", "gc",
    "genericpath", "getopt", "getpass", "gettext", "glob", "graphlib", "grp", "gzip",
    "hashlib", "heapq", "hmac", "html", "http", "idlelib", "imaplib", "imghdr", "imp",
    "importlib", "inspect", "io", "ipaddress", "itertools", "json", "keyword", "lib2to3",
    "linecache", "locale", "logging", "lzma", "mailbox", "mailcap", "marshal", "math",
    "mimetypes", "mmap", "modulefinder", "msilib", "msvcrt", "multiprocessing", "netrc",
    "nis", "nntplib", "nt", "ntpath", "nturl2path", "numbers", "opcode", "operator",
    "optparse", "os", "ossaudiodev", "pathlib", "pdb", "pickle", "pickletools", "pipes",
    "pkgutil", "platform", "plistlib", "poplib", "posix", "posixpath", "pprint", "profile",
    "pstats", "pty", "pwd", "py_compile", "pyclbr", "pydoc", "pydoc_data", "pyexpat",
    "queue", "quopri", "random", "re", "readline", "reprlib", "resource", "rlcompleter",
    "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex", "shutil",
    "signal", "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver", "spwd",
    "sqlite3", "sre_compile", "sre_constants", "sre_parse", "ssl", "stat", "statistics",
    "string", "stringprep", "struct", "subprocess", "sunau", "symtable", "sys", "sysconfig",
    "syslog", "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "textwrap", "this",
    "threading", "time", "timeit", "tkinter", "token", "tokenize", "tomllib", "trace",
    "traceback", "tracemalloc", "tty", "turtle", "turtledemo", "types", "typing",
    "unicodedata", "unittest", "urllib", "uu", "uuid", "venv", "warnings", "wave",
    "weakref", "webbrowser", "winreg", "winsound", "wsgiref", "xdrlib", "xml", "xmlrpc",
    "zipapp", "zipfile", "zipimport", "zlib", "zoneinfo",
];

/// Default whitelist: contract-language names a generic analyzer reports as undefined.
pub const DEFAULT_WHITELIST_PATTERNS: &[&str] = &[
    "export",
    "construct",
    "Hash",
    "Variable",
    "ForeignHash",
    "ForeignVariable",
    "LogEvent",
    "ctx",
    "now",
    "block_num",
    "block_hash",
    "chain_id",
    "random",
    "datetime",
    "hashlib",
    "crypto",
    "importlib",
];

pub fn is_reserved_name(name: &str) -> bool {
    name.starts_with('_') || name.ends_with('_')
}

pub fn is_illegal_builtin(name: &str) -> bool {
    ILLEGAL_BUILTINS.contains(&name) && !PERMITTED_BUILTINS.contains(&name)
}

/// True if the root segment of a dotted module path names a stdlib module.
pub fn is_stdlib_module(dotted: &str) -> bool {
    let root = dotted.split('.').next().unwrap_or(dotted).trim();
    STDLIB_MODULES.contains(&root)
}

pub fn is_valid_decorator(name: &str) -> bool {
    VALID_DECORATORS.contains(&name)
}

pub fn is_allowed_annotation(name: &str) -> bool {
    ALLOWED_ANNOTATIONS.contains(&name)
}

pub fn is_storage_constructor(name: &str) -> bool {
    STORAGE_CONSTRUCTORS.contains(&name)
}

pub fn is_declarable_storage(name: &str) -> bool {
    DECLARABLE_STORAGE.contains(&name)
}
