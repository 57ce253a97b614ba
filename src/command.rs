use bytes::{BufMut, Bytes, BytesMut};

/// An outbound command: a name plus its arguments.
///
/// On the wire every request is a RESP array of bulk strings, so the
/// builder keeps arguments as opaque bytes and numeric values are
/// decimalized to ASCII on the way in.
///
/// ```
/// use retis::Command;
///
/// let cmd = Command::new("SET").arg("foo").arg("bar");
/// assert_eq!(cmd.encode(), &b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n"[..]);
/// ```
#[derive(Clone, Debug)]
pub struct Command {
    args: Vec<Bytes>,
}

impl Command {
    pub fn new(name: &'static str) -> Command {
        Command {
            args: vec![Bytes::from_static(name.as_bytes())],
        }
    }

    pub fn arg(mut self, arg: impl ToArg) -> Command {
        self.args.push(arg.to_arg());
        self
    }

    /// Append every element of a slice, for variadic commands (DEL,
    /// MGET, SUBSCRIBE, ...).
    pub fn args<A: ToArg + Clone>(mut self, args: &[A]) -> Command {
        for arg in args {
            self.args.push(arg.clone().to_arg());
        }
        self
    }

    pub fn name(&self) -> &[u8] {
        &self.args[0]
    }

    /// Encode as a RESP array of bulk strings.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();

        buf.put_u8(b'*');
        buf.put_slice(self.args.len().to_string().as_bytes());
        buf.put_slice(b"\r\n");

        for arg in &self.args {
            buf.put_u8(b'$');
            buf.put_slice(arg.len().to_string().as_bytes());
            buf.put_slice(b"\r\n");
            buf.put_slice(arg);
            buf.put_slice(b"\r\n");
        }

        buf.freeze()
    }
}

/// Conversion into a binary-safe command argument.
pub trait ToArg {
    fn to_arg(self) -> Bytes;
}

impl ToArg for Bytes {
    fn to_arg(self) -> Bytes {
        self
    }
}

impl ToArg for &Bytes {
    fn to_arg(self) -> Bytes {
        self.clone()
    }
}

impl ToArg for &str {
    fn to_arg(self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for String {
    fn to_arg(self) -> Bytes {
        Bytes::from(self)
    }
}

impl ToArg for &String {
    fn to_arg(self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for &[u8] {
    fn to_arg(self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl ToArg for Vec<u8> {
    fn to_arg(self) -> Bytes {
        Bytes::from(self)
    }
}

macro_rules! to_arg_via_display {
    ($($t:ty),*) => {
        $(impl ToArg for $t {
            fn to_arg(self) -> Bytes {
                Bytes::from(self.to_string())
            }
        })*
    };
}

to_arg_via_display!(i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_set_command() {
        let cmd = Command::new("SET").arg("foo").arg("bar");

        assert_eq!(
            cmd.encode(),
            Bytes::from_static(b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n")
        );
    }

    #[test]
    fn encode_numeric_arguments_as_ascii_decimal() {
        let cmd = Command::new("EXPIRE").arg("foo").arg(120_i64);

        assert_eq!(
            cmd.encode(),
            Bytes::from_static(b"*3\r\n$6\r\nEXPIRE\r\n$3\r\nfoo\r\n$3\r\n120\r\n")
        );
    }

    #[test]
    fn encode_binary_argument_verbatim() {
        let cmd = Command::new("SET").arg("k").arg(&b"a\x00\r\nb"[..]);

        assert_eq!(
            cmd.encode(),
            Bytes::from_static(b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$5\r\na\x00\r\nb\r\n")
        );
    }

    #[test]
    fn encode_variadic_arguments() {
        let cmd = Command::new("DEL").args(&["a", "b", "c"]);

        assert_eq!(
            cmd.encode(),
            Bytes::from_static(b"*4\r\n$3\r\nDEL\r\n$1\r\na\r\n$1\r\nb\r\n$1\r\nc\r\n")
        );
    }
}
