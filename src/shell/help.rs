use colored::Colorize;

const COMMANDS: &[(&str, &str)] = &[
    (
        "{ CONNECT | OPEN } Address",
        "Connect to the server with the specified address.",
    ),
    ("{ DISCONNECT | DISCO }", "Disconnect from the server."),
    (
        "{ UPLOAD | UP } SrcPath [ DstFile ]",
        "Upload a file from the client to the current directory on the server. \
         Put SrcPath between \" characters if it contains spaces. DstFile is an optional \
         name for the destination file and cannot contain a path; by default the name is \
         taken from SrcPath.",
    ),
    (
        "DOWNLOAD SrcFile [ DstPath ]",
        "Download a file from the current directory on the server. SrcFile cannot contain \
         a path. DstPath is an optional destination path; by default the file is written \
         to the local current directory under the same name.",
    ),
    ("DIR", "List the current directory on the server."),
    (
        "CD [ DirName ]",
        "Change the current directory on the server and print it. Without DirName the \
         directory stays the same. DirName is a single directory name, or .. to go one \
         level up.",
    ),
    (
        "{ MKDIR | MD } DirName",
        "Create a directory in the current directory on the server.",
    ),
    (
        "{ RMDIR | RD } DirName",
        "Remove a directory from the current directory on the server. The directory must \
         be empty.",
    ),
    (
        "{ DELETE | DEL } FileName",
        "Delete a file from the current directory on the server.",
    ),
    (
        "LCD [ Path ]",
        "Change the local current directory. Without Path it is only printed.",
    ),
    ("EXIT", "Disconnect and terminate the application."),
    ("{ HELP | ? }", "Print this help message."),
    ("!command", "Execute the specified command on the client."),
];

pub fn print_help() {
    println!("{}", "List of commands (case insensitive):".white());
    for (command, explanation) in COMMANDS {
        println!("{} - {}", command.bright_white().bold(), explanation.white());
    }
}
